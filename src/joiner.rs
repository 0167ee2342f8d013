//! Joins message fragments into sentences.
//!
//! `["the menu \"a.toml\"", "invalid attribute \"rows\"", "it must be a number"]`
//! becomes `The menu "a.toml": invalid attribute "rows", it must be a number`.
//! The first separator of a sentence is `": "`, later ones are `", "`. A
//! fragment ending in `.` closes the sentence: the next fragment follows after a
//! space and is capitalized.

pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    let estimate = parts.iter().map(|p| p.as_ref().len() + 2).sum();
    let mut joiner = Joiner {
        output: String::with_capacity(estimate),
        previous: None,
        separated_sentence: false,
    };
    for part in parts {
        joiner.append(part.as_ref());
    }
    joiner.output
}

struct Joiner<'a> {
    output: String,
    previous: Option<&'a str>,
    separated_sentence: bool,
}

impl<'a> Joiner<'a> {
    fn append(&mut self, part: &'a str) {
        match self.previous {
            None => self.output.push_str(&capitalize_first(part)),
            Some(previous) if previous.ends_with('.') => {
                self.output.push(' ');
                self.separated_sentence = false;
                self.output.push_str(&capitalize_first(part));
            }
            Some(_) => {
                if self.separated_sentence {
                    self.output.push_str(", ");
                } else {
                    self.output.push_str(": ");
                    self.separated_sentence = true;
                }
                self.output.push_str(part);
            }
        }
        self.previous = Some(part);
    }
}

pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
