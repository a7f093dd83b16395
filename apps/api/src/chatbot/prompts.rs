// Chatbot prompt templates, sampling parameters and the quick action catalog.

use crate::llm_client::CompletionParams;

pub const RESUME_ADVICE_PARAMS: CompletionParams = CompletionParams::new(600, 0.7);
pub const GENERAL_PARAMS: CompletionParams = CompletionParams::new(400, 0.7);
pub const SEARCH_PARAMS: CompletionParams = CompletionParams::new(700, 0.6);

/// Exchanges of history included in each handler's prompt.
pub const RESUME_HISTORY: usize = 3;
pub const GENERAL_HISTORY: usize = 2;

pub const RESUME_ADVICE_PROMPT: &str = "\
You are an expert resume and career advisor. Help the user with their resume-related question.
{resume_context}
Recent conversation context:
{history}

User's question: {message}

Guidelines:
- Provide specific, actionable advice
- Use the resume context when relevant
- Be encouraging and professional
- If suggesting improvements, be specific
- Keep responses concise but helpful
{language_instruction}";

pub const RESUME_CONTEXT_BLOCK: &str = "
Current Resume Context:
- Name: {name}
- Role: {tag}
- Skills: {skills}
- Experience: {experience}
- Education: {education}
";

pub const GENERAL_PROMPT: &str = "\
You are a helpful AI assistant focused on career and professional development.

Recent conversation:
{history}

User's question: {message}

Guidelines:
- Be helpful and informative
- If the question is not career-related, gently guide back to resume/career topics
- Provide practical advice when possible
- Keep responses concise
{language_instruction}";

pub const SEARCH_PROMPT: &str = "\
Based on the following search results, answer the user's question comprehensively.

User's question: {message}

Search results:
{results}

Guidelines:
- Provide a comprehensive answer based on the search results
- Be factual and cite information appropriately
- If the information relates to careers/resumes, provide actionable advice
- Keep the response informative but concise
- Don't mention that you searched the web, just provide the information naturally
{language_instruction}";

pub const RESUME_ADVICE_FALLBACK: &str = "I'm here to help with your resume questions!";
pub const GENERAL_FALLBACK: &str = "I'm here to help! How can I assist you today?";
pub const SEARCH_FALLBACK: &str = "Here's what I found based on current information...";

pub const RESUME_ADVICE_ERROR: &str =
    "I'd be happy to help with your resume question. Could you please rephrase it?";
pub const GENERAL_ERROR: &str =
    "I'm here to help! How can I assist you with your resume or career questions?";
pub const SEARCH_ERROR: &str =
    "I found some information but had trouble processing it. Could you try rephrasing your question?";

/// Suggested opening messages, grouped by category.
pub const QUICK_ACTIONS: &[(&str, &[&str])] = &[
    (
        "resume_improvement",
        &[
            "Help me improve my resume summary",
            "What skills should I add to my resume?",
            "How can I make my experience section better?",
            "Review my education section",
            "Suggest improvements for my resume format",
        ],
    ),
    (
        "job_search",
        &[
            "Search for current salary trends in my field",
            "Find information about company culture",
            "What are the latest hiring trends?",
            "Help me prepare for interviews",
            "Find job requirements for my target role",
        ],
    ),
    (
        "career_advice",
        &[
            "How to write better job descriptions?",
            "Career transition advice",
            "Professional networking tips",
            "How to negotiate salary?",
            "Building a personal brand",
        ],
    ),
    (
        "industry_research",
        &[
            "Find information about my industry",
            "Latest technology trends",
            "Skills in demand for my field",
            "Professional development opportunities",
            "Industry certifications worth pursuing",
        ],
    ),
];
