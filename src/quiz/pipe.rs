use super::{QuizFormat, QuizInterpreter, QuizQuestion, OPTION_COUNT};

const FIELD_SEPARATOR: char = '|';

/// Prompt, four options, answer
const FIELD_COUNT: usize = OPTION_COUNT + 2;

/// Reads one question per line: `prompt|opt1|opt2|opt3|opt4|answer`, where the
/// answer is the 1-based position of the correct option.
pub struct PipeInterpreter;

impl QuizInterpreter for PipeInterpreter {
    fn parse(&self, response: &str) -> Vec<QuizQuestion> {
        response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let question = parse_line(line);
                if question.is_none() {
                    tracing::debug!("Dropping malformed quiz line: {}", line);
                }
                question
            })
            .collect()
    }

    fn format(&self) -> QuizFormat {
        QuizFormat::Pipe
    }
}

fn parse_line(line: &str) -> Option<QuizQuestion> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let position: usize = fields[FIELD_COUNT - 1].trim().parse().ok()?;
    let correct_index = position.checked_sub(1)?;

    let options = [fields[1], fields[2], fields[3], fields[4]];
    QuizQuestion::new(fields[0], options, correct_index)
}
