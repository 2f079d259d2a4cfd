use super::Concept;
use super::fragment::{FragmentSpec, LIST_NAMES, NAMES, Param, WORDS, indent};

const LOOPS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "for-range",
        params: &[Param::Pick(&["i", "j", "k", "n"]), Param::Int { min: 3, max: 12 }],
        render: |v| {
            format!(
                "for {0} in 0..{1} {{\n{2}println!(\"{{}}\", {0});\n}}",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "iter-enumerate",
        params: &[
            Param::Pick(LIST_NAMES),
            Param::IntList {
                min_len: 3,
                max_len: 5,
                min: 1,
                max: 9,
            },
        ],
        render: |v| {
            format!(
                "let {0} = vec![{1}];\nfor (idx, x) in {0}.iter().enumerate() {{\n{2}if x % 2 == 0 {{\n{3}continue;\n{2}}}\n{2}println!(\"{{idx}}: {{x}}\");\n}}",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "loop-break",
        params: &[Param::Int { min: 4, max: 10 }],
        render: |v| {
            format!(
                "let mut n = 0;\nlet found = loop {{\n{1}if n == {0} {{\n{2}break n * 2;\n{1}}}\n{1}n += 1;\n}};",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const CONDITIONALS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "if-else",
        params: &[Param::Int { min: 0, max: 10 }],
        render: |v| {
            format!(
                "let x = {0};\nlet label = if x < 3 {{\n{1}\"low\"\n}} else if x < 7 {{\n{1}\"mid\"\n}} else {{\n{1}\"high\"\n}};",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "match-str",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "let code = match \"{0}\" {{\n{1}\"alpha\" => 1,\n{1}\"beta\" => 2,\n{1}_ => 0,\n}};",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "if-let",
        params: &[Param::Pick(LIST_NAMES)],
        render: |v| {
            format!(
                "if let Some(first) = {0}.first() {{\n{1}println!(\"{{first}}\");\n}} else {{\n{1}println!(\"empty\");\n}}",
                v[0],
                indent(1)
            )
        },
    },
];

const FUNCTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "add",
        params: &[Param::Int { min: 1, max: 9 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "fn add(a: i32, b: i32) -> i32 {{\n{2}a + b\n}}\n\nprintln!(\"{{}}\", add({0}, {1}));",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "slice-sum",
        params: &[Param::IntList {
            min_len: 2,
            max_len: 4,
            min: 1,
            max: 9,
        }],
        render: |v| {
            format!(
                "fn total(nums: &[i32]) -> i32 {{\n{1}nums.iter().sum()\n}}\n\nprintln!(\"{{}}\", total(&[{0}]));",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "closure",
        params: &[Param::Int { min: 2, max: 5 }],
        render: |v| {
            format!(
                "let scale = |x: i32| x * {0};\nlet scaled: Vec<i32> = (1..4).map(scale).collect();",
                v[0]
            )
        },
    },
];

const EXCEPTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "parse-question",
        params: &[Param::Pick(&["42", "notnum", "7"])],
        render: |v| {
            format!(
                "fn parse(s: &str) -> Result<i32, std::num::ParseIntError> {{\n{1}let n = s.trim().parse::<i32>()?;\n{1}Ok(n * 2)\n}}\n\nmatch parse(\"{0}\") {{\n{1}Ok(n) => println!(\"{{n}}\"),\n{1}Err(e) => eprintln!(\"bad input: {{e}}\"),\n}}",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "custom-error",
        params: &[Param::Int { min: 0, max: 2 }],
        render: |v| {
            format!(
                "#[derive(Debug)]\nenum MathError {{\n{1}DivByZero,\n}}\n\nfn inv(x: f64) -> Result<f64, MathError> {{\n{1}if x == 0.0 {{\n{2}return Err(MathError::DivByZero);\n{1}}}\n{1}Ok(1.0 / x)\n}}\n\nprintln!(\"{{:?}}\", inv({0}.0));",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const OOP: &[FragmentSpec] = &[
    FragmentSpec {
        name: "trait-impl",
        params: &[Param::Pick(&["woof", "meow", "quack"])],
        render: |v| {
            format!(
                "trait Speak {{\n{1}fn speak(&self) -> String;\n}}\n\nstruct Pet;\n\nimpl Speak for Pet {{\n{1}fn speak(&self) -> String {{\n{2}\"{0}\".to_string()\n{1}}}\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "struct-impl",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "struct Rect {{\n{2}w: u32,\n{2}h: u32,\n}}\n\nimpl Rect {{\n{2}fn area(&self) -> u32 {{\n{3}self.w * self.h\n{2}}}\n}}\n\nlet r = Rect {{ w: {0}, h: {1} }};",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
];

const TYPING: &[FragmentSpec] = &[
    FragmentSpec {
        name: "generic-largest",
        params: &[Param::IntList {
            min_len: 3,
            max_len: 5,
            min: 1,
            max: 99,
        }],
        render: |v| {
            format!(
                "fn largest<T: PartialOrd + Copy>(xs: &[T]) -> T {{\n{1}let mut max = xs[0];\n{1}for &x in xs {{\n{2}if x > max {{\n{3}max = x;\n{2}}}\n{1}}}\n{1}max\n}}\n\nprintln!(\"{{}}\", largest(&[{0}]));",
                v[0],
                indent(1),
                indent(2),
                indent(3)
            )
        },
    },
    FragmentSpec {
        name: "generic-struct",
        params: &[Param::Pick(NAMES)],
        render: |v| {
            format!(
                "struct Wrapper<T> {{\n{1}inner: T,\n}}\n\nimpl<T: std::fmt::Display> Wrapper<T> {{\n{1}fn show(&self) -> String {{\n{2}format!(\"[{{}}]\", self.inner)\n{1}}}\n}}\n\nlet w = Wrapper {{ inner: \"{0}\" }};",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const IO: &[FragmentSpec] = &[
    FragmentSpec {
        name: "fs-write-read",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "use std::fs;\n\nfn main() -> std::io::Result<()> {{\n{1}fs::write(\"data.txt\", \"{0}\")?;\n{1}let text = fs::read_to_string(\"data.txt\")?;\n{1}println!(\"{{text}}\");\n{1}Ok(())\n}}",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "buf-lines",
        params: &[Param::Pick(&["notes.txt", "input.log", "words.txt"])],
        render: |v| {
            format!(
                "use std::fs::File;\nuse std::io::{{BufRead, BufReader}};\n\nlet file = File::open(\"{0}\")?;\nfor line in BufReader::new(file).lines() {{\n{1}println!(\"{{}}\", line?);\n}}",
                v[0],
                indent(1)
            )
        },
    },
];

pub fn fragments(concept: Concept) -> &'static [FragmentSpec] {
    match concept {
        Concept::Loops => LOOPS,
        Concept::Conditionals => CONDITIONALS,
        Concept::Functions => FUNCTIONS,
        Concept::Exceptions => EXCEPTIONS,
        Concept::Oop => OOP,
        Concept::Typing => TYPING,
        Concept::Io => IO,
        Concept::Comprehensions
        | Concept::Classes
        | Concept::Decorators
        | Concept::Regex
        | Concept::Async => &[],
    }
}
