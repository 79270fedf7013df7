use crate::cli::{Difficulty, SummaryLevel};
use crate::quiz::QuizFormat;

pub fn summary_prompt(transcript: &str, level: SummaryLevel) -> String {
    format!("Summarize in {} detail:\n\n{}", level, transcript)
}

/// Quiz prompt whose output shape matches the interpreter for `format`
pub fn quiz_prompt(source: &str, count: u8, difficulty: Difficulty, format: QuizFormat) -> String {
    let shape = match format {
        QuizFormat::Blocks => {
            "Each MCQ should be formatted as:\n\
             Question: <question text>\n\
             A) <option1>\n\
             B) <option2>\n\
             C) <option3>\n\
             D) <option4>\n\
             Answer: <correct option letter>\n\
             Separate MCQs with a blank line."
        }
        QuizFormat::Pipe => {
            "Write each MCQ on a single line formatted as:\n\
             <question text>|<option1>|<option2>|<option3>|<option4>|<number of the correct option, 1-4>\n\
             Do not number the lines and do not use the | character anywhere else."
        }
        QuizFormat::Json => {
            "Respond with only a JSON array. Each element must be an object of the form:\n\
             {\"question\": \"<question text>\", \"options\": [\"<option1>\", \"<option2>\", \"<option3>\", \"<option4>\"], \"answer\": <index of the correct option, 0-3>}"
        }
    };

    format!(
        "Generate {} multiple-choice questions (MCQs) with {} difficulty from the following text. \
         Every question must have exactly four options and exactly one correct answer. {}\n\n{}",
        count, difficulty, shape, source
    )
}

pub fn flashcards_prompt(source: &str, count: u8) -> String {
    format!(
        "Create {} flashcards covering the key terms and ideas in the following text. \
         Format each flashcard as:\n\
         Front: <term or question>\n\
         Back: <definition or answer>\n\
         Separate flashcards with a blank line.\n\n{}",
        count, source
    )
}
