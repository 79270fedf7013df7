use serde_json::Value;

use super::{letter_index, QuizFormat, QuizInterpreter, QuizQuestion, OPTION_COUNT};

/// Reads a JSON list of `{"question", "options", "answer"}` records.
///
/// The text is only ever decoded as data. Each record is checked field by
/// field; a record with a missing or mistyped field is dropped on its own.
/// `answer` may be a 0-based index, an option letter, or the text of the
/// correct option.
pub struct JsonInterpreter;

impl QuizInterpreter for JsonInterpreter {
    fn parse(&self, response: &str) -> Vec<QuizQuestion> {
        let Some(records) = decode_records(response) else {
            tracing::debug!("Quiz response is not a JSON list of records");
            return Vec::new();
        };

        records
            .iter()
            .filter_map(|record| {
                let question = parse_record(record);
                if question.is_none() {
                    tracing::debug!("Dropping malformed quiz record: {}", record);
                }
                question
            })
            .collect()
    }

    fn format(&self) -> QuizFormat {
        QuizFormat::Json
    }
}

/// Locate and decode the record list, tolerating code fences and surrounding prose.
///
/// Falls back to decoding one JSON value at each `[` or `{` in turn; the first
/// one that holds a record list wins and whatever trails it is ignored.
fn decode_records(response: &str) -> Option<Vec<Value>> {
    if let Some(records) = serde_json::from_str(response.trim()).ok().and_then(into_records) {
        return Some(records);
    }

    response
        .match_indices(['[', '{'])
        .find_map(|(start, _)| {
            let value = serde_json::Deserializer::from_str(&response[start..])
                .into_iter::<Value>()
                .next()?
                .ok()?;
            into_records(value)
        })
}

fn into_records(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(mut object) => match object.remove("questions") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

fn parse_record(record: &Value) -> Option<QuizQuestion> {
    let prompt = record.get("question")?.as_str()?;

    let raw_options = record.get("options")?.as_array()?;
    if raw_options.len() != OPTION_COUNT {
        return None;
    }
    let mut options = [""; OPTION_COUNT];
    for (slot, value) in options.iter_mut().zip(raw_options) {
        *slot = value.as_str()?;
    }

    let correct_index = answer_index(record.get("answer")?, &options)?;

    QuizQuestion::new(prompt, options, correct_index)
}

fn answer_index(answer: &Value, options: &[&str; OPTION_COUNT]) -> Option<usize> {
    match answer {
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => {
            let text = text.trim();
            letter_index(text).or_else(|| options.iter().position(|option| option.trim() == text))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<QuizQuestion> {
        JsonInterpreter.parse(text)
    }

    #[test]
    fn test_parses_plain_list() {
        let text = r#"[
            {"question": "What is 2+2?", "options": ["3", "4", "5", "6"], "answer": 1},
            {"question": "Largest planet?", "options": ["Mars", "Venus", "Jupiter", "Earth"], "answer": "C"},
            {"question": "Colour of the sky?", "options": ["Green", "Blue", "Red", "Black"], "answer": "Blue"}
        ]"#;

        let questions = parse(text);
        let indexes: Vec<usize> = questions.iter().map(|q| q.correct_index()).collect();
        assert_eq!(indexes, vec![1, 2, 1]);
    }

    #[test]
    fn test_parses_fenced_and_wrapped_output() {
        let fenced = "Sure! Here you go:\n```json\n[{\"question\": \"Q\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \"answer\": 0}]\n```";
        assert_eq!(parse(fenced).len(), 1);

        let wrapped = r#"{"questions": [{"question": "Q", "options": ["a", "b", "c", "d"], "answer": 3}]}"#;
        assert_eq!(parse(wrapped)[0].correct_index(), 3);
    }

    #[test]
    fn test_brackets_in_surrounding_prose_are_skipped() {
        let trailing = "```json\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"answer\":0}]\n```\nNote: answers are 0-based [0-3].";
        assert_eq!(parse(trailing).len(), 1);

        let leading = "Answers are indexes in [0-3] {zero based}:\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"answer\":2}]";
        assert_eq!(parse(leading)[0].correct_index(), 2);
    }

    #[test]
    fn test_drops_records_with_bad_fields() {
        let text = r#"[
            {"question": "no answer", "options": ["a", "b", "c", "d"]},
            {"question": "three options", "options": ["a", "b", "c"], "answer": 0},
            {"question": "index too big", "options": ["a", "b", "c", "d"], "answer": 4},
            {"question": "negative", "options": ["a", "b", "c", "d"], "answer": -1},
            {"question": "unknown text", "options": ["a", "b", "c", "d"], "answer": "z"},
            {"question": 7, "options": ["a", "b", "c", "d"], "answer": 0},
            {"question": "numeric option", "options": ["a", 2, "c", "d"], "answer": 0},
            {"question": "", "options": ["a", "b", "c", "d"], "answer": 0},
            "not a record",
            {"question": "kept", "options": ["a", "b", "c", "d"], "answer": 2}
        ]"#;

        let questions = parse(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "kept");
    }

    #[test]
    fn test_code_like_input_is_only_data() {
        assert!(parse("__import__('os').system('echo hi')").is_empty());
        assert!(parse("[{'question': 'Q', 'options': ['a','b','c','d'], 'answer': 0}]").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("{\"title\": \"not a quiz\"}").is_empty());
    }
}
