use super::{letter_index, QuizFormat, QuizInterpreter, QuizQuestion, OPTION_COUNT, OPTION_LETTERS};

const QUESTION_LABEL: &str = "Question:";
const ANSWER_LABEL: &str = "Answer:";

/// Minimum lines in a block: question, four options, answer
const MIN_BLOCK_LINES: usize = 2 + OPTION_COUNT;

/// Reads blank-line separated blocks:
///
/// ```text
/// Question: What is 2+2?
/// A) 3
/// B) 4
/// C) 5
/// D) 6
/// Answer: B
/// ```
pub struct BlockInterpreter;

impl QuizInterpreter for BlockInterpreter {
    fn parse(&self, response: &str) -> Vec<QuizQuestion> {
        split_blocks(response)
            .iter()
            .filter_map(|block| {
                let question = parse_block(block);
                if question.is_none() {
                    tracing::debug!("Dropping malformed quiz block: {:?}", block.first());
                }
                question
            })
            .collect()
    }

    fn format(&self) -> QuizFormat {
        QuizFormat::Blocks
    }
}

/// Group lines into blocks separated by blank lines
fn split_blocks(response: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in response.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Option<QuizQuestion> {
    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    let prompt = lines[0]
        .strip_prefix(QUESTION_LABEL)
        .unwrap_or(lines[0]);

    let mut options = [""; OPTION_COUNT];
    for (slot, (line, letter)) in options
        .iter_mut()
        .zip(lines[1..=OPTION_COUNT].iter().zip(OPTION_LETTERS))
    {
        *slot = option_text(line, letter)?;
    }

    let answer = lines[1 + OPTION_COUNT].strip_prefix(ANSWER_LABEL)?.trim();
    let correct_index = letter_index(answer)?;

    QuizQuestion::new(prompt, options, correct_index)
}

/// Text after an `X)` marker, if the line carries the expected letter
fn option_text<'a>(line: &'a str, letter: char) -> Option<&'a str> {
    line.strip_prefix(letter)?.strip_prefix(')')
}
