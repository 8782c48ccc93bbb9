//! `ContestProblem` message of the code_contests dataset.
//!
//! The message is declared with prost derives rather than generated by a
//! build script, so building the crate does not require `protoc`. Field tags
//! follow `contest_problem.proto` of the dataset release.

use crate::domain::model::{FieldValue, ProblemFields};
use serde_json::{json, Map, Value};

#[derive(Clone, PartialEq, prost::Message)]
pub struct ContestProblem {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, repeated, tag = "3")]
    pub public_tests: Vec<contest_problem::Test>,
    #[prost(message, repeated, tag = "4")]
    pub private_tests: Vec<contest_problem::Test>,
    #[prost(message, repeated, tag = "5")]
    pub generated_tests: Vec<contest_problem::Test>,
    #[prost(enumeration = "contest_problem::Source", tag = "6")]
    pub source: i32,
    #[prost(enumeration = "contest_problem::Difficulty", tag = "7")]
    pub difficulty: i32,
    #[prost(message, repeated, tag = "8")]
    pub solutions: Vec<contest_problem::Solution>,
    #[prost(message, repeated, tag = "9")]
    pub incorrect_solutions: Vec<contest_problem::Solution>,
    #[prost(int32, tag = "10")]
    pub cf_contest_id: i32,
    #[prost(string, tag = "11")]
    pub cf_index: String,
    #[prost(float, tag = "12")]
    pub cf_points: f32,
    #[prost(int32, tag = "13")]
    pub cf_rating: i32,
    #[prost(string, repeated, tag = "14")]
    pub cf_tags: Vec<String>,
    #[prost(bool, tag = "15")]
    pub is_description_translated: bool,
    #[prost(string, tag = "16")]
    pub untranslated_description: String,
    #[prost(message, optional, tag = "17")]
    pub time_limit: Option<prost_types::Duration>,
    #[prost(int64, tag = "18")]
    pub memory_limit_bytes: i64,
    #[prost(string, tag = "19")]
    pub input_file: String,
    #[prost(string, tag = "20")]
    pub output_file: String,
}

pub mod contest_problem {
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Test {
        #[prost(string, tag = "1")]
        pub input: String,
        #[prost(string, tag = "2")]
        pub output: String,
    }

    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Solution {
        #[prost(enumeration = "solution::Language", tag = "1")]
        pub language: i32,
        #[prost(string, tag = "2")]
        pub solution: String,
    }

    pub mod solution {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
        #[repr(i32)]
        pub enum Language {
            UnknownLanguage = 0,
            Python = 1,
            Cpp = 2,
            Python3 = 3,
            Java = 4,
        }

        impl Language {
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Language::UnknownLanguage => "UNKNOWN_LANGUAGE",
                    Language::Python => "PYTHON",
                    Language::Cpp => "CPP",
                    Language::Python3 => "PYTHON3",
                    Language::Java => "JAVA",
                }
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Source {
        UnknownSource = 0,
        Codechef = 1,
        Codeforces = 2,
        Hackerearth = 3,
        Codejam = 4,
        Atcoder = 5,
        Aizu = 6,
    }

    impl Source {
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Source::UnknownSource => "UNKNOWN_SOURCE",
                Source::Codechef => "CODECHEF",
                Source::Codeforces => "CODEFORCES",
                Source::Hackerearth => "HACKEREARTH",
                Source::Codejam => "CODEJAM",
                Source::Atcoder => "ATCODER",
                Source::Aizu => "AIZU",
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Difficulty {
        UnknownDifficulty = 0,
        Easy = 1,
        Medium = 2,
        Hard = 3,
        Harder = 4,
        Hardest = 5,
        External = 6,
        A = 7,
        B = 8,
        C = 9,
        D = 10,
        E = 11,
        F = 12,
        G = 13,
        H = 14,
        I = 15,
        J = 16,
        K = 17,
        L = 18,
        M = 19,
        N = 20,
        O = 21,
        P = 22,
        Q = 23,
        R = 24,
        S = 25,
        T = 26,
        U = 27,
        V = 28,
    }

    impl Difficulty {
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Difficulty::UnknownDifficulty => "UNKNOWN_DIFFICULTY",
                Difficulty::Easy => "EASY",
                Difficulty::Medium => "MEDIUM",
                Difficulty::Hard => "HARD",
                Difficulty::Harder => "HARDER",
                Difficulty::Hardest => "HARDEST",
                Difficulty::External => "EXTERNAL",
                Difficulty::A => "A",
                Difficulty::B => "B",
                Difficulty::C => "C",
                Difficulty::D => "D",
                Difficulty::E => "E",
                Difficulty::F => "F",
                Difficulty::G => "G",
                Difficulty::H => "H",
                Difficulty::I => "I",
                Difficulty::J => "J",
                Difficulty::K => "K",
                Difficulty::L => "L",
                Difficulty::M => "M",
                Difficulty::N => "N",
                Difficulty::O => "O",
                Difficulty::P => "P",
                Difficulty::Q => "Q",
                Difficulty::R => "R",
                Difficulty::S => "S",
                Difficulty::T => "T",
                Difficulty::U => "U",
                Difficulty::V => "V",
            }
        }
    }
}

use contest_problem::solution::Language;
use contest_problem::{Difficulty, Solution, Source, Test};

/// Enum values outside the schema render as their number, like protobuf JSON.
fn enum_label<E, F>(raw: i32, name: F) -> String
where
    E: TryFrom<i32>,
    F: Fn(E) -> &'static str,
{
    E::try_from(raw)
        .map(|value| name(value).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn insert_text(fields: &mut ProblemFields, key: &str, value: &str) {
    if !value.is_empty() {
        fields.insert(key, FieldValue::Text(value.to_string()));
    }
}

fn test_json(test: &Test) -> Value {
    let mut object = Map::new();
    if !test.input.is_empty() {
        object.insert("input".to_string(), json!(test.input));
    }
    if !test.output.is_empty() {
        object.insert("output".to_string(), json!(test.output));
    }
    Value::Object(object)
}

fn solution_json(solution: &Solution) -> Value {
    let mut object = Map::new();
    if solution.language != 0 {
        object.insert(
            "language".to_string(),
            json!(enum_label(solution.language, |l: Language| l.as_str_name())),
        );
    }
    if !solution.solution.is_empty() {
        object.insert("solution".to_string(), json!(solution.solution));
    }
    Value::Object(object)
}

/// Protobuf JSON form of a `google.protobuf.Duration`, e.g. `"2s"` or `"1.500s"`.
fn duration_json(duration: &prost_types::Duration) -> String {
    let nanos = duration.nanos.unsigned_abs();
    let sign = if duration.seconds < 0 || duration.nanos < 0 {
        "-"
    } else {
        ""
    };
    let seconds = duration.seconds.unsigned_abs();
    if nanos == 0 {
        format!("{sign}{seconds}s")
    } else if nanos % 1_000_000 == 0 {
        format!("{sign}{seconds}.{:03}s", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{sign}{seconds}.{:06}s", nanos / 1_000)
    } else {
        format!("{sign}{seconds}.{nanos:09}s")
    }
}

/// Shortest decimal form of an `f32`, so `0.1` stays `0.1` instead of widening.
fn float_json(value: f32) -> Value {
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| json!(value.to_string()))
}

impl ContestProblem {
    /// Human-readable source label, e.g. `CODEFORCES`.
    pub fn source_label(&self) -> String {
        enum_label(self.source, |s: Source| s.as_str_name())
    }

    /// Generic view keyed by protobuf JSON names. Fields holding their
    /// default value are absent.
    pub fn to_fields(&self) -> ProblemFields {
        let mut fields = ProblemFields::new();

        insert_text(&mut fields, "name", &self.name);
        insert_text(&mut fields, "description", &self.description);
        for (key, tests) in [
            ("publicTests", &self.public_tests),
            ("privateTests", &self.private_tests),
            ("generatedTests", &self.generated_tests),
        ] {
            if !tests.is_empty() {
                let value = Value::Array(tests.iter().map(test_json).collect());
                fields.insert(key, FieldValue::Json(value));
            }
        }
        if self.source != 0 {
            fields.insert("source", FieldValue::Text(self.source_label()));
        }
        if self.difficulty != 0 {
            let label = enum_label(self.difficulty, |d: Difficulty| d.as_str_name());
            fields.insert("difficulty", FieldValue::Text(label));
        }
        for (key, solutions) in [
            ("solutions", &self.solutions),
            ("incorrectSolutions", &self.incorrect_solutions),
        ] {
            if !solutions.is_empty() {
                let value = Value::Array(solutions.iter().map(solution_json).collect());
                fields.insert(key, FieldValue::Json(value));
            }
        }
        if self.cf_contest_id != 0 {
            fields.insert("cfContestId", FieldValue::Json(json!(self.cf_contest_id)));
        }
        insert_text(&mut fields, "cfIndex", &self.cf_index);
        if self.cf_points != 0.0 {
            fields.insert("cfPoints", FieldValue::Json(float_json(self.cf_points)));
        }
        if self.cf_rating != 0 {
            fields.insert("cfRating", FieldValue::Json(json!(self.cf_rating)));
        }
        if !self.cf_tags.is_empty() {
            fields.insert("cfTags", FieldValue::Json(json!(self.cf_tags)));
        }
        if self.is_description_translated {
            fields.insert("isDescriptionTranslated", FieldValue::Json(json!(true)));
        }
        insert_text(
            &mut fields,
            "untranslatedDescription",
            &self.untranslated_description,
        );
        if let Some(time_limit) = &self.time_limit {
            fields.insert("timeLimit", FieldValue::Text(duration_json(time_limit)));
        }
        // int64 values are strings in protobuf JSON
        if self.memory_limit_bytes != 0 {
            fields.insert(
                "memoryLimitBytes",
                FieldValue::Text(self.memory_limit_bytes.to_string()),
            );
        }
        insert_text(&mut fields, "inputFile", &self.input_file);
        insert_text(&mut fields, "outputFile", &self.output_file);

        fields
    }
}
