// Prompt constants for the resume-analysis endpoint.
// The roadmap and chat endpoints carry caller-supplied prompts and have no
// server-side template.

/// Resume analysis prompt template. Replace `{job_title}`,
/// `{required_skills}` and `{resume_text}` before sending.
///
/// The four markdown headings are part of the client contract — the
/// frontend splits the response on them, so they must appear exactly.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) and career coach. Analyze the following resume for a "{job_title}" position.
The key skills for this role are: {required_skills}.

Resume Text:
---
{resume_text}
---

Provide a concise analysis in markdown format. Structure your feedback with these exact headings and nothing else:
### ATS Score
[Provide an estimated ATS compatibility score out of 100, for example: 85/100]
### Strengths
- [List 2-3 strengths of the resume]
### Weaknesses
- [List 2-3 specific, actionable areas for improvement]
### Suggestions for Improvement
- [List 2-3 actionable suggestions to improve the resume and its ATS score]"#;

/// Builds the full analysis prompt. Skills are joined with `", "`; an empty
/// skill list renders as an empty string rather than being rejected.
pub fn build_resume_analysis_prompt(
    job_title: &str,
    required_skills: &[String],
    resume_text: &str,
) -> String {
    RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{required_skills}", &required_skills.join(", "))
        .replace("{resume_text}", resume_text)
}
