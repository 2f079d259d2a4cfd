use super::Concept;
use super::fragment::{
    BOOLS_PY, FragmentSpec, LIST_NAMES, LOOP_VARS, NAMES, Param, Value, WORDS, indent,
};

const LOOPS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "for-range",
        params: &[Param::Pick(LOOP_VARS), Param::Int { min: 3, max: 12 }],
        render: |v| format!("for {0} in range({1}):\n{2}print({0})", v[0], v[1], indent(1)),
    },
    FragmentSpec {
        name: "for-continue",
        params: &[
            Param::Pick(LOOP_VARS),
            Param::Int { min: 0, max: 5 },
            Param::Int { min: 3, max: 10 },
        ],
        render: |v| {
            let start = v[1].int();
            let end = start + v[2].int();
            format!(
                "for {0} in range({start}, {end}):\n{1}if {0} % 2 == 0:\n{2}continue\n{1}print({0})",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "for-zip",
        params: &[
            Param::Pick(&["a", "b", "x", "y"]),
            Param::Pick(&["p", "q", "u", "w"]),
            Param::Int { min: 3, max: 7 },
            Param::Int { min: 3, max: 7 },
        ],
        render: |v| {
            format!(
                "for {0}, {1} in zip(range({2}), range({3})):\n{4}print({0} + {1})",
                v[0],
                v[1],
                v[2],
                v[3],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "while-counter",
        params: &[Param::Pick(LOOP_VARS), Param::Int { min: 3, max: 8 }],
        render: |v| {
            format!(
                "{0} = 0\nwhile {0} <= {1}:\n{2}print({0})\n{2}{0} += 1",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "while-break",
        params: &[Param::Pick(LOOP_VARS), Param::Int { min: 4, max: 10 }],
        render: |v| {
            format!(
                "{0} = 0\nwhile True:\n{2}if {0} == {1}:\n{3}break\n{2}{0} += 1",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "enumerate",
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
                "{0} = [{1}]\nfor idx, x in enumerate({0}):\n{2}print(idx, x)",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
];

const CONDITIONALS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "if-elif-else",
        params: &[Param::Int { min: 0, max: 10 }],
        render: |v| {
            format!(
                "x = {0}\nif x < 3:\n{1}print(\"low\")\nelif x < 7:\n{1}print(\"mid\")\nelse:\n{1}print(\"high\")",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "ternary",
        params: &[Param::Int { min: 1, max: 9 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "a = {}; b = {}\nprint(\"bigger\" if a > b else \"smaller or equal\")",
                v[0], v[1]
            )
        },
    },
    FragmentSpec {
        name: "match",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "v = \"{0}\"\nmatch v:\n{1}case \"alpha\":\n{2}print(1)\n{1}case \"beta\":\n{2}print(2)\n{1}case _:\n{2}print(0)",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "flag-check",
        params: &[Param::Pick(BOOLS_PY), Param::Pick(NAMES)],
        render: |v| {
            format!(
                "ready = {0}\nif not ready:\n{2}print(\"waiting for {1}\")\nelse:\n{2}print(\"go\")",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
];

const FUNCTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "default-arg",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "def add(a: int, b: int = {0}) -> int:\n{2}return a + b\n\nprint(add({1}))",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "varargs",
        params: &[Param::IntList {
            min_len: 2,
            max_len: 4,
            min: 1,
            max: 9,
        }],
        render: |v| {
            format!(
                "def total(*args: int) -> int:\n{1}s = 0\n{1}for x in args:\n{2}s += x\n{1}return s\n\nprint(total({0}))",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "kwargs",
        params: &[Param::Pick(NAMES), Param::Pick(&[":", "-", "/"])],
        render: |v| {
            format!(
                "def fmt(name: str, **opts) -> str:\n{2}sep = opts.get(\"sep\", \"-\")\n{2}return f\"{{name}}{{sep}}{{len(name)}}\"\n\nprint(fmt(\"{0}\", sep=\"{1}\"))",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
];

const EXCEPTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "value-error",
        params: &[Param::Int { min: -9, max: -1 }],
        render: |v| {
            format!(
                "try:\n{1}x = int(\"notnum\")\nexcept ValueError:\n{1}x = {0}\nprint(x)",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "raise-finally",
        params: &[Param::Int { min: 0, max: 2 }],
        render: |v| {
            format!(
                "def inv(x):\n{1}if x == 0:\n{2}raise ZeroDivisionError(\"nope\")\n{1}return 1 / x\n\ntry:\n{1}print(inv({0}))\nfinally:\n{1}print(\"done\")",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "try-else",
        params: &[Param::Pick(&["missing.txt", "data.csv", "notes.md"])],
        render: |v| {
            format!(
                "try:\n{1}f = open(\"{0}\")\nexcept FileNotFoundError as e:\n{1}print(\"missing\", e)\nelse:\n{1}print(f.read())\n{1}f.close()",
                v[0],
                indent(1)
            )
        },
    },
];

const COMPREHENSIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "list-comp",
        params: &[Param::Int { min: 4, max: 9 }],
        render: |v| format!("squares = [x * x for x in range({})]\nprint(squares)", v[0]),
    },
    FragmentSpec {
        name: "set-comp",
        params: &[Param::Int { min: 6, max: 12 }],
        render: |v| {
            format!(
                "evens = {{x for x in range({}) if x % 2 == 0}}\nprint(evens)",
                v[0]
            )
        },
    },
    FragmentSpec {
        name: "dict-comp",
        params: &[Param::Pick(&["abcde", "hello", "world"])],
        render: |v| format!("d = {{c: ord(c) for c in \"{}\"}}\nprint(d)", v[0]),
    },
];

const CLASSES: &[FragmentSpec] = &[
    FragmentSpec {
        name: "box-area",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "class Box:\n{2}def __init__(self, w, h):\n{3}self.w = w\n{3}self.h = h\n\n{2}def area(self):\n{3}return self.w * self.h\n\nb = Box({0}, {1})\nprint(b.area())",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "property",
        params: &[Param::Pick(NAMES)],
        render: |v| {
            format!(
                "class User:\n{1}def __init__(self, name):\n{2}self._name = name\n\n{1}@property\n{1}def name(self):\n{2}return self._name\n\nu = User(\"{0}\")\nprint(u.name)",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "staticmethod",
        params: &[Param::Int { min: 2, max: 9 }],
        render: |v| {
            format!(
                "class Math:\n{1}@staticmethod\n{1}def twice(x):\n{2}return 2 * x\n\nprint(Math.twice({0}))",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const OOP: &[FragmentSpec] = &[
    FragmentSpec {
        name: "polymorphism",
        params: &[Param::Pick(&["woof", "meow", "quack"])],
        render: |v| {
            format!(
                "class Animal:\n{1}def speak(self):\n{2}raise NotImplementedError\n\nclass Pet(Animal):\n{1}def speak(self):\n{2}print(\"{0}\")\n\ndef talk(a: Animal):\n{1}a.speak()\n\ntalk(Pet())",
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
                "class Base:\n{1}def value(self):\n{2}return {0}\n\nclass Child(Base):\n{1}def value(self):\n{2}return super().value() + 1\n\nprint(Child().value())",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const TYPING: &[FragmentSpec] = &[
    FragmentSpec {
        name: "generic-bag",
        params: &[Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "from typing import TypeVar, Generic, List\nT = TypeVar(\"T\")\n\nclass Bag(Generic[T]):\n{1}def __init__(self):\n{2}self.items: List[T] = []\n\n{1}def add(self, x: T) -> None:\n{2}self.items.append(x)\n\nb = Bag[int]()\nb.add({0})\nprint(b.items)",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "typed-dict",
        params: &[Param::Int { min: 1, max: 99 }, Param::Pick(NAMES)],
        render: |v| {
            format!(
                "from typing import TypedDict\n\nclass User(TypedDict):\n{2}id: int\n{2}name: str\n\nu: User = {{\"id\": {0}, \"name\": \"{1}\"}}\nprint(u[\"name\"])",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "union",
        params: &[Param::Int { min: 0, max: 1 }],
        render: |v| {
            format!(
                "from typing import Union\nx: Union[int, str]\nx = {} or \"a\"\nprint(x)",
                v[0]
            )
        },
    },
];

const DECORATORS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "wraps-log",
        params: &[Param::Int { min: 1, max: 9 }, Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "from functools import wraps\n\ndef log(fn):\n{2}@wraps(fn)\n{2}def inner(*a, **k):\n{3}print(fn.__name__)\n{3}return fn(*a, **k)\n{2}return inner\n\n@log\ndef add(a, b):\n{2}return a + b\n\nprint(add({0}, {1}))",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "parametric",
        params: &[Param::Int { min: 2, max: 4 }],
        render: |v| {
            format!(
                "def times(n):\n{1}def deco(fn):\n{2}def inner(*a, **k):\n{3}for _ in range(n):\n{4}fn(*a, **k)\n{2}return inner\n{1}return deco\n\n@times({0})\ndef hello():\n{1}print(\"hi\")\n\nhello()",
                v[0],
                indent(1),
                indent(2),
                indent(3),
                indent(4)
            )
        },
    },
];

const IO: &[FragmentSpec] = &[
    FragmentSpec {
        name: "with-open",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "with open(\"data.txt\", \"w\", encoding=\"utf-8\") as f:\n{1}f.write(\"{0}\")\n\nwith open(\"data.txt\") as f:\n{1}print(f.read())",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "pathlib",
        params: &[Param::IntList {
            min_len: 3,
            max_len: 5,
            min: 1,
            max: 9,
        }],
        render: |v| {
            let nums = match &v[0] {
                Value::List(items) => items
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            };
            format!(
                "from pathlib import Path\np = Path(\"nums.txt\")\np.write_text(\"{nums}\")\nprint(p.read_text())"
            )
        },
    },
];

const REGEX: &[FragmentSpec] = &[
    FragmentSpec {
        name: "findall",
        params: &[Param::Pick(&["ab12cdEF", "x9y8z7", "snake_case42"])],
        render: |v| {
            format!(
                "import re\nm = re.findall(r\"[a-z]+\", \"{}\")\nprint(m)",
                v[0]
            )
        },
    },
    FragmentSpec {
        name: "groups",
        params: &[Param::Int { min: 10, max: 99 }, Param::Pick(WORDS)],
        render: |v| {
            format!(
                "import re\npat = re.compile(r\"(\\d+)-(\\w+)\")\nm = pat.search(\"{}-{}\")\nprint(m.group(1), m.group(2))",
                v[0], v[1]
            )
        },
    },
    FragmentSpec {
        name: "sub",
        params: &[Param::Pick(&["*", "#", "_"])],
        render: |v| {
            format!(
                "import re\ns = re.sub(r\"\\d\", \"{}\", \"a1b2c3\")\nprint(s)",
                v[0]
            )
        },
    },
];

const ASYNC: &[FragmentSpec] = &[
    FragmentSpec {
        name: "await-sleep",
        params: &[Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "import asyncio\n\nasync def work(i):\n{1}await asyncio.sleep(0)\n{1}print(i)\n\nasync def main():\n{1}await work({0})\n\nasyncio.run(main())",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "gather",
        params: &[Param::Int { min: 1, max: 5 }, Param::Int { min: 1, max: 5 }],
        render: |v| {
            format!(
                "import asyncio\n\nasync def one(x):\n{2}await asyncio.sleep(0)\n{2}return x\n\nasync def main():\n{2}a, b = await asyncio.gather(one({0}), one({1}))\n{2}print(a + b)\n\nasyncio.run(main())",
                v[0],
                v[1],
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
        Concept::Comprehensions => COMPREHENSIONS,
        Concept::Classes => CLASSES,
        Concept::Oop => OOP,
        Concept::Typing => TYPING,
        Concept::Decorators => DECORATORS,
        Concept::Io => IO,
        Concept::Regex => REGEX,
        Concept::Async => ASYNC,
    }
}
