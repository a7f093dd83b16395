// Resume LLM prompt templates and sampling parameters.
// Placeholders are filled with `llm_client::prompts::render`.

use crate::llm_client::CompletionParams;

pub const SUMMARY_PARAMS: CompletionParams = CompletionParams::new(200, 0.7);
pub const EXTRACT_PARAMS: CompletionParams = CompletionParams::new(1500, 0.3);
pub const OPTIMIZE_PARAMS: CompletionParams = CompletionParams::new(800, 0.5);
pub const SKILLS_PARAMS: CompletionParams = CompletionParams::new(300, 0.6);

pub const SUMMARY_PROMPT: &str = "\
Generate a professional resume summary for a candidate with:
Education: {education}
Skills: {skills}

Requirements:
- Keep it concise and professional (3-4 sentences)
- Make it ATS-friendly with relevant keywords
- Focus on value proposition and career highlights
- Use action-oriented language

Return only the summary text without any formatting or extra text.";

pub const EXTRACT_PROMPT: &str = r#"Parse the following resume text into structured JSON data. Extract these fields:

Required fields:
- name (string): Full name
- tag (string): Professional title or role
- email (string): Email address
- location (string): City, State or full address
- number (string): Phone number
- summary (string): Professional summary or objective
- websites (array): LinkedIn, portfolio, GitHub URLs
- skills (array): Technical and soft skills
- education (array): Degrees, institutions, graduation years
- experience (array): Job titles, companies, descriptions
- student (array): Student status like ["Current Student", "Recent Graduate"]
- courses (array): Relevant coursework or certifications
- internships (array): Internship experiences
- extracurriculars (array): Clubs, activities, volunteer work
- hobbies (array): Personal interests and hobbies
- references (array): Professional references
- languages (array): Spoken/written languages

Instructions:
- Use empty string "" for missing string fields
- Use empty array [] for missing array fields
- Each array item must be a single string
- Split comma-separated values into array items
- Clean and normalize all data
- Extract email addresses, phone numbers, and URLs accurately
- {json_only}

Resume text:
{resume_text}"#;

pub const OPTIMIZE_PROMPT: &str = r#"Analyze this job description and current resume data to provide optimization suggestions:

Job Description:
{job_description}

Current Resume Data:
Name: {name}
Current Summary: {summary}
Skills: {skills}
Experience: {experience}

Provide optimization suggestions in this JSON format:
{
    "optimized_summary": "Rewritten summary tailored to the job",
    "suggested_skills": ["skill1", "skill2", "skill3"],
    "keyword_matches": ["keyword1", "keyword2"],
    "improvement_suggestions": ["suggestion1", "suggestion2"]
}

Focus on:
- ATS optimization with relevant keywords
- Highlighting matching skills and experience
- Suggesting missing but relevant skills
- Improving summary for better job alignment

{json_only}"#;

pub const SKILLS_PROMPT: &str = r#"Suggest 10-15 relevant skills for a {profession} professional.

Current skills: {current_skills}

Return a JSON array of suggested skills that are:
- Industry-relevant and in-demand
- Not already in the current skills list
- Mix of technical and soft skills
- ATS-friendly keywords

Format: ["skill1", "skill2", "skill3", ...]
{json_only}"#;
