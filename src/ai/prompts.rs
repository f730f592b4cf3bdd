use serde::Deserialize;

use crate::engine::schedule::GeneratedBlock;
use crate::engine::test::Question;
use crate::store::schema::{Material, MaterialKind};

/// Material text is capped before prompting. Larger documents get truncated,
/// not rejected.
pub const MATERIAL_CONTENT_CAP: usize = 20_000;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct TestPayload {
    pub questions: Vec<Question>,
}

pub fn plan_prompt(weak_subjects: &[String], today: &str) -> PromptPair {
    let weak_areas = if weak_subjects.is_empty() {
        "General Awareness".to_string()
    } else {
        weak_subjects.join(", ")
    };
    let system = format!(
        "You are a strict Exam Planner AI.\n\
         Create a JSON schedule for an SSC CGL aspirant.\n\
         Total time MUST be approx 7 hours.\n\
         MANDATORY: Include exactly one 60-minute session titled \"Reading & Practice Task\" that uses the user's uploaded library material.\n\
         Focus on: {weak_areas}.\n\
         Format: JSON Array of objects: [{{\"title\": \"Subject\", \"duration_min\": 90, \"type\": \"Deep Work\"}}, ...]\n\
         IMPORTANT: Return Strictly Valid JSON. Escape all backslashes in strings."
    );
    let user = format!("Generate today's plan. Date: {today}. Make it hard.");
    PromptPair { system, user }
}

pub fn material_test_prompt(material: &Material) -> PromptPair {
    let mut user = match material.kind {
        // File-backed materials carry no readable text. Prompt off the name.
        MaterialKind::Pdf => format!(
            "The user uploaded a file named \"{title}\". Since I cannot read local files directly, \
             assume the content matches the title. Generate a relevant, tough SSC CGL level mock \
             test based on the topic implied by the filename \"{title}\".",
            title = material.title
        ),
        MaterialKind::Text => {
            let capped: String = material.content.chars().take(MATERIAL_CONTENT_CAP).collect();
            format!(
                "Analyze the ENTIRE text provided below and create a comprehensive mock test. \
                 Do not limit questions to the beginning. Ensure questions cover the start, middle, \
                 and end of the content.\n\nTitle: {}\n\nFull Content:\n{}",
                material.title, capped
            )
        }
    };
    if !material.instruction.trim().is_empty() {
        user.push_str(&format!(
            "\n\nIMPORTANT USER INSTRUCTION: {}\nFollow this instruction strictly while generating questions.",
            material.instruction
        ));
    }

    let system = "You are an Exam Setter for SSC CGL.\n\
        Task: Generate a JSON object with a \"questions\" array.\n\
        Create 10 Multiple Choice Questions based on the User's Topic/Material. Ensure questions \
        are distributed evenly across the entire content provided.\n\
        Each question object must have:\n\
        - id (1-10)\n\
        - question_en (English text)\n\
        - question_hi (Hindi translation)\n\
        - options_en (array of 4 English strings)\n\
        - options_hi (array of 4 Hindi strings)\n\
        - correctIndex (0-3)\n\
        - explanation_en (Detailed solution in English)\n\
        - explanation_hi (Detailed solution in Hindi).\n\
        IMPORTANT: Return Strictly Valid JSON. Escape all backslashes in math formulas \
        (e.g. use \\\\theta instead of \\theta)."
        .to_string();

    PromptPair { system, user }
}

pub fn vocab_prompt() -> PromptPair {
    let system = "You are an expert English teacher for SSC CGL exams.\n\
        Generate 20 important, high-frequency vocabulary words.\n\
        Format: Strictly a JSON Array of objects.\n\
        Each object must have:\n\
        - \"word\": The word (String)\n\
        - \"hindi\": Hindi meaning (String)\n\
        - \"type\": Part of speech (String)\n\
        - \"meaning\": Short English definition (String)\n\
        Example: [{\"word\": \"Diligent\", \"hindi\": \"मेहनती\", \"type\": \"Adj\", \"meaning\": \
        \"Having or showing care and conscientiousness in one's work or duties.\"}]"
        .to_string();
    PromptPair {
        system,
        user: "Give me 20 new words.".to_string(),
    }
}

pub fn vocab_test_prompt(words: &[String]) -> PromptPair {
    let system = format!(
        "You are an SSC CGL Exam Setter.\n\
         Create a Mock Test JSON based on these vocabulary words.\n\
         Generate exactly {count} questions (1 question for each word provided).\n\
         Questions should test Synonyms, Antonyms, or Meanings.\n\n\
         Format: Strictly a JSON Object with a \"questions\" array.\n\
         Each question object:\n\
         - id (number)\n\
         - question_en (String)\n\
         - options_en (Array of 4 strings)\n\
         - correctIndex (0-3)\n\
         - explanation_en (String)\n\n\
         Return ONLY valid JSON.",
        count = words.len()
    );
    let user = format!("Words: {}", words.join(", "));
    PromptPair { system, user }
}

pub fn analysis_prompt(discipline_score: i32, target_hours: u32, weak_subjects: &[String]) -> PromptPair {
    let context = serde_json::json!({
        "currentDiscipline": discipline_score,
        "targetHours": target_hours,
        "weakAreas": weak_subjects,
    });
    let system = format!(
        "You are \"The Sergeant\", a strict AI analyst. Analyze: {context}. Be brutal but encouraging."
    );
    PromptPair {
        system,
        user: "Analyze my performance.".to_string(),
    }
}

/// A usable plan has at least one block and no zero-length blocks.
pub fn validate_plan(blocks: &[GeneratedBlock]) -> bool {
    !blocks.is_empty() && blocks.iter().all(|b| b.duration_min > 0)
}

/// A usable test has questions that each carry four options in at least one
/// language and an answer index inside that range.
pub fn validate_test(questions: &[Question]) -> bool {
    !questions.is_empty()
        && questions.iter().all(|q| {
            let options = q.option_texts(crate::engine::test::Language::En);
            options.len() == 4 && q.correct_index < options.len()
        })
}
