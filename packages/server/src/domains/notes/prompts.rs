use crate::domains::courses::ChapterSpec;

const CHAPTER_NOTES_PROMPT: &str = "Generate detailed exam material content for the following chapter.
Include all topics and format in HTML.
Chapter Details: ";

/// Prompt asking for exam-oriented HTML notes covering one chapter.
pub fn chapter_notes_prompt(chapter: &ChapterSpec) -> Result<String, serde_json::Error> {
    let details = serde_json::to_string(chapter.as_value())?;
    Ok(format!("{}{}", CHAPTER_NOTES_PROMPT, details))
}
