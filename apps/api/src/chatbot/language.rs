//! Language detection and localized canned replies.

use serde::Serialize;
use whatlang::{Lang, Script};

/// A language the assistant answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const ENGLISH: Language = Language {
    code: "en",
    name: "English",
};

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    ENGLISH,
    Language { code: "ur", name: "Urdu" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
];

impl Language {
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim().to_lowercase();
        SUPPORTED_LANGUAGES.iter().copied().find(|l| l.code == code)
    }

    pub fn is_english(&self) -> bool {
        self.code == ENGLISH.code
    }
}

fn iso_639_1(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Eng => Some("en"),
        Lang::Urd => Some("ur"),
        Lang::Hin => Some("hi"),
        Lang::Spa => Some("es"),
        Lang::Fra => Some("fr"),
        Lang::Deu => Some("de"),
        Lang::Ara => Some("ar"),
        Lang::Cmn => Some("zh"),
        Lang::Jpn => Some("ja"),
        Lang::Kor => Some("ko"),
        _ => None,
    }
}

/// Latin-script guesses below this confidence are treated as English.
const MIN_LATIN_CONFIDENCE: f64 = 0.5;

/// Scripts that narrow the guess to a few languages, so even a short message
/// is trusted.
fn is_distinctive_script(script: Script) -> bool {
    matches!(
        script,
        Script::Arabic
            | Script::Devanagari
            | Script::Hangul
            | Script::Mandarin
            | Script::Hiragana
            | Script::Katakana
    )
}

/// Detects the message language. Weak Latin-script guesses and unsupported
/// languages fall back to English.
pub fn detect_language(text: &str) -> Language {
    whatlang::detect(text)
        .filter(|info| {
            is_distinctive_script(info.script()) || info.confidence() >= MIN_LATIN_CONFIDENCE
        })
        .and_then(|info| iso_639_1(info.lang()))
        .and_then(Language::from_code)
        .unwrap_or(ENGLISH)
}

/// Fixed replies that never go through the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedReply {
    Welcome,
    Guardrail,
    SearchFailed,
}

impl CannedReply {
    /// Localized text; languages without a translation get English.
    pub fn text(self, language: Language) -> &'static str {
        match (self, language.code) {
            (CannedReply::Welcome, "ur") => "سلام! میں آپ کا ذہین ریزیومے اسسٹنٹ ہوں۔ میں آپ کے ریزیومے کو بہتر بنانے، موجودہ انڈسٹری کی معلومات تلاش کرنے، اور کیریئر کے سوالات کا جواب دینے میں مدد کر سکتا ہوں۔ آج میں آپ کی کیسے مدد کر سکتا ہوں؟",
            (CannedReply::Welcome, _) => "Hi! I'm your smart resume assistant. I can help you improve your resume, search for current industry information, and answer career questions. How can I help you today?",
            (CannedReply::Guardrail, "ur") => "میں ریزیومے اور کیریئر سے متعلق سوالات میں مدد کے لیے بنایا گیا ہوں۔ آئیے اپنی گفتگو کو آپ کے بہتر پیشہ ورانہ پروفائل بنانے پر مرکوز رکھتے ہیں!",
            (CannedReply::Guardrail, _) => "I'm designed to help with resume and career-related questions. Let's keep our conversation focused on helping you build a better professional profile!",
            (CannedReply::SearchFailed, "ur") => "میں اس موضوع پر موجودہ معلومات نہیں مل سکیں۔ اس کے بجائے میں آپ کو ریزیومے سے متعلق سوالات میں مدد کرتا ہوں!",
            (CannedReply::SearchFailed, _) => "I couldn't find current information on that topic. Let me help you with resume-related questions instead!",
        }
    }
}
