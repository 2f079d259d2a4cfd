use super::Concept;
use super::fragment::{BOOLS, FragmentSpec, LIST_NAMES, NAMES, Param, WORDS, indent};

const LOOPS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "for-index",
        params: &[Param::Pick(&["i", "j", "k"]), Param::Int { min: 3, max: 12 }],
        render: |v| {
            format!(
                "for (let {0} = 0; {0} < {1}; {0}++) {{\n{2}console.log({0});\n}}",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "for-of",
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
                "const {0} = [{1}];\nfor (const x of {0}) {{\n{2}if (x % 2 === 0) {{\n{3}continue;\n{2}}}\n{2}console.log(x);\n}}",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "while-break",
        params: &[Param::Int { min: 4, max: 10 }],
        render: |v| {
            format!(
                "let n = 0;\nwhile (true) {{\n{1}if (n === {0}) {{\n{2}break;\n{1}}}\n{1}n += 1;\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const CONDITIONALS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "if-else-if",
        params: &[Param::Int { min: 0, max: 10 }],
        render: |v| {
            format!(
                "const x = {0};\nif (x < 3) {{\n{1}console.log(\"low\");\n}} else if (x < 7) {{\n{1}console.log(\"mid\");\n}} else {{\n{1}console.log(\"high\");\n}}",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "switch",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "const v = \"{0}\";\nswitch (v) {{\n{1}case \"alpha\":\n{2}console.log(1);\n{2}break;\n{1}default:\n{2}console.log(0);\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "ternary",
        params: &[Param::Int { min: 1, max: 9 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "const a = {}, b = {};\nconsole.log(a > b ? \"bigger\" : \"smaller or equal\");",
                v[0], v[1]
            )
        },
    },
];

const FUNCTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "default-param",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "function add(a, b = {0}) {{\n{2}return a + b;\n}}\n\nconsole.log(add({1}));",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "arrow-rest",
        params: &[Param::IntList {
            min_len: 2,
            max_len: 4,
            min: 1,
            max: 9,
        }],
        render: |v| {
            format!(
                "const total = (...args) => args.reduce((s, x) => s + x, 0);\nconsole.log(total({}));",
                v[0]
            )
        },
    },
    FragmentSpec {
        name: "closure",
        params: &[Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "function counter(step = {0}) {{\n{1}let n = 0;\n{1}return () => {{\n{2}n += step;\n{2}return n;\n{1}}};\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const EXCEPTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "json-parse",
        params: &[Param::Pick(&["{bad", "[1, 2", "nope"])],
        render: |v| {
            format!(
                "try {{\n{1}JSON.parse(\"{0}\");\n}} catch (err) {{\n{1}console.error(err.message);\n}} finally {{\n{1}console.log(\"done\");\n}}",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "throw",
        params: &[Param::Int { min: 0, max: 2 }],
        render: |v| {
            format!(
                "function inv(x) {{\n{1}if (x === 0) {{\n{2}throw new RangeError(\"nope\");\n{1}}}\n{1}return 1 / x;\n}}\n\ntry {{\n{1}console.log(inv({0}));\n}} catch (e) {{\n{1}console.log(e.name);\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const CLASSES: &[FragmentSpec] = &[
    FragmentSpec {
        name: "box-area",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "class Box {{\n{2}constructor(w, h) {{\n{3}this.w = w;\n{3}this.h = h;\n{2}}}\n\n{2}area() {{\n{3}return this.w * this.h;\n{2}}}\n}}\n\nconsole.log(new Box({0}, {1}).area());",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "getter",
        params: &[Param::Pick(NAMES)],
        render: |v| {
            format!(
                "class User {{\n{1}#name;\n\n{1}constructor(name) {{\n{2}this.#name = name;\n{1}}}\n\n{1}get name() {{\n{2}return this.#name;\n{1}}}\n}}\n\nconsole.log(new User(\"{0}\").name);",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const OOP: &[FragmentSpec] = &[
    FragmentSpec {
        name: "extends",
        params: &[Param::Pick(&["woof", "meow", "quack"])],
        render: |v| {
            format!(
                "class Animal {{\n{1}speak() {{\n{2}throw new Error(\"not implemented\");\n{1}}}\n}}\n\nclass Pet extends Animal {{\n{1}speak() {{\n{2}console.log(\"{0}\");\n{1}}}\n}}\n\nnew Pet().speak();",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "super-call",
        params: &[Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "class Base {{\n{1}value() {{\n{2}return {0};\n{1}}}\n}}\n\nclass Child extends Base {{\n{1}value() {{\n{2}return super.value() + 1;\n{1}}}\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const REGEX: &[FragmentSpec] = &[
    FragmentSpec {
        name: "match-all",
        params: &[Param::Pick(&["ab12cdEF", "x9y8z7", "snake_case42"])],
        render: |v| format!("const m = \"{}\".match(/[a-z]+/g);\nconsole.log(m);", v[0]),
    },
    FragmentSpec {
        name: "groups",
        params: &[Param::Int { min: 10, max: 99 }, Param::Pick(WORDS)],
        render: |v| {
            format!(
                "const pat = /(\\d+)-(\\w+)/;\nconst [, num, word] = pat.exec(\"{}-{}\");\nconsole.log(num, word);",
                v[0], v[1]
            )
        },
    },
    FragmentSpec {
        name: "replace",
        params: &[Param::Pick(&["*", "#", "_"])],
        render: |v| {
            format!(
                "const s = \"a1b2c3\".replace(/\\d/g, \"{}\");\nconsole.log(s);",
                v[0]
            )
        },
    },
];

const ASYNC: &[FragmentSpec] = &[
    FragmentSpec {
        name: "await-timeout",
        params: &[Param::Int { min: 10, max: 500 }],
        render: |v| {
            format!(
                "const sleep = (ms) => new Promise((r) => setTimeout(r, ms));\n\nasync function main() {{\n{1}await sleep({0});\n{1}console.log(\"awake\");\n}}\n\nmain();",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "promise-all",
        params: &[
            Param::Int { min: 1, max: 5 },
            Param::Int { min: 1, max: 5 },
            Param::Pick(BOOLS),
        ],
        render: |v| {
            format!(
                "async function one(x) {{\n{3}return x;\n}}\n\nasync function main() {{\n{3}const [a, b] = await Promise.all([one({0}), one({1})]);\n{3}if ({2}) {{\n{3}{3}console.log(a + b);\n{3}}}\n}}",
                v[0],
                v[1],
                v[2],
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
        Concept::Classes => CLASSES,
        Concept::Oop => OOP,
        Concept::Regex => REGEX,
        Concept::Async => ASYNC,
        Concept::Comprehensions | Concept::Typing | Concept::Decorators | Concept::Io => &[],
    }
}
