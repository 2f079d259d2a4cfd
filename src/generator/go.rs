use super::Concept;
use super::fragment::{FragmentSpec, LIST_NAMES, NAMES, Param, WORDS, indent};

const LOOPS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "for-index",
        params: &[Param::Pick(&["i", "j", "k"]), Param::Int { min: 3, max: 12 }],
        render: |v| {
            format!(
                "for {0} := 0; {0} < {1}; {0}++ {{\n{2}fmt.Println({0})\n}}",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "range-slice",
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
                "{0} := []int{{{1}}}\nfor idx, x := range {0} {{\n{2}if x%2 == 0 {{\n{3}continue\n{2}}}\n{2}fmt.Println(idx, x)\n}}",
                v[0],
                v[1],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "for-break",
        params: &[Param::Int { min: 4, max: 10 }],
        render: |v| {
            format!(
                "n := 0\nfor {{\n{1}if n == {0} {{\n{2}break\n{1}}}\n{1}n++\n}}",
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
                "x := {0}\nif x < 3 {{\n{1}fmt.Println(\"low\")\n}} else if x < 7 {{\n{1}fmt.Println(\"mid\")\n}} else {{\n{1}fmt.Println(\"high\")\n}}",
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
                "switch v := \"{0}\"; v {{\ncase \"alpha\":\n{1}fmt.Println(1)\ncase \"beta\":\n{1}fmt.Println(2)\ndefault:\n{1}fmt.Println(0)\n}}",
                v[0],
                indent(1)
            )
        },
    },
];

const FUNCTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "multi-return",
        params: &[Param::Int { min: 10, max: 99 }, Param::Int { min: 2, max: 9 }],
        render: |v| {
            format!(
                "func divmod(a, b int) (int, int) {{\n{2}return a / b, a % b\n}}\n\nq, r := divmod({0}, {1})\nfmt.Println(q, r)",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "variadic",
        params: &[Param::IntList {
            min_len: 2,
            max_len: 4,
            min: 1,
            max: 9,
        }],
        render: |v| {
            format!(
                "func total(nums ...int) int {{\n{1}s := 0\n{1}for _, x := range nums {{\n{2}s += x\n{1}}}\n{1}return s\n}}\n\nfmt.Println(total({0}))",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const EXCEPTIONS: &[FragmentSpec] = &[
    FragmentSpec {
        name: "atoi",
        params: &[Param::Pick(&["notnum", "12x", "4.5"])],
        render: |v| {
            format!(
                "n, err := strconv.Atoi(\"{0}\")\nif err != nil {{\n{1}fmt.Println(\"bad input:\", err)\n{1}return\n}}\nfmt.Println(n)",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "sentinel",
        params: &[Param::Int { min: 0, max: 2 }],
        render: |v| {
            format!(
                "var ErrZero = errors.New(\"zero\")\n\nfunc inv(x float64) (float64, error) {{\n{1}if x == 0 {{\n{2}return 0, ErrZero\n{1}}}\n{1}return 1 / x, nil\n}}\n\nif _, err := inv({0}); errors.Is(err, ErrZero) {{\n{1}fmt.Println(\"nope\")\n}}",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
];

const TYPING: &[FragmentSpec] = &[
    FragmentSpec {
        name: "generic-map",
        params: &[Param::IntList {
            min_len: 2,
            max_len: 4,
            min: 1,
            max: 9,
        }],
        render: |v| {
            format!(
                "func Map[T, U any](xs []T, f func(T) U) []U {{\n{1}out := make([]U, 0, len(xs))\n{1}for _, x := range xs {{\n{2}out = append(out, f(x))\n{1}}}\n{1}return out\n}}\n\nfmt.Println(Map([]int{{{0}}}, func(x int) int {{ return x * x }}))",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "struct-user",
        params: &[Param::Int { min: 1, max: 99 }, Param::Pick(NAMES)],
        render: |v| {
            format!(
                "type User struct {{\n{2}ID   int\n{2}Name string\n}}\n\nu := User{{ID: {0}, Name: \"{1}\"}}\nfmt.Println(u.Name)",
                v[0],
                v[1],
                indent(1)
            )
        },
    },
];

const IO: &[FragmentSpec] = &[
    FragmentSpec {
        name: "write-read",
        params: &[Param::Pick(WORDS)],
        render: |v| {
            format!(
                "if err := os.WriteFile(\"data.txt\", []byte(\"{0}\"), 0o644); err != nil {{\n{1}log.Fatal(err)\n}}\ndata, err := os.ReadFile(\"data.txt\")\nif err != nil {{\n{1}log.Fatal(err)\n}}\nfmt.Println(string(data))",
                v[0],
                indent(1)
            )
        },
    },
    FragmentSpec {
        name: "scanner",
        params: &[Param::Pick(&["notes.txt", "input.log", "words.txt"])],
        render: |v| {
            format!(
                "f, err := os.Open(\"{0}\")\nif err != nil {{\n{1}log.Fatal(err)\n}}\ndefer f.Close()\n\nsc := bufio.NewScanner(f)\nfor sc.Scan() {{\n{1}fmt.Println(sc.Text())\n}}",
                v[0],
                indent(1)
            )
        },
    },
];

const ASYNC: &[FragmentSpec] = &[
    FragmentSpec {
        name: "waitgroup",
        params: &[Param::Int { min: 2, max: 6 }],
        render: |v| {
            format!(
                "var wg sync.WaitGroup\nfor i := 0; i < {0}; i++ {{\n{1}wg.Add(1)\n{1}go func(n int) {{\n{2}defer wg.Done()\n{2}fmt.Println(n)\n{1}}}(i)\n}}\nwg.Wait()",
                v[0],
                indent(1),
                indent(2)
            )
        },
    },
    FragmentSpec {
        name: "channel",
        params: &[Param::Int { min: 1, max: 9 }],
        render: |v| {
            format!(
                "ch := make(chan int)\ngo func() {{\n{1}ch <- {0}\n{1}close(ch)\n}}()\nfor x := range ch {{\n{1}fmt.Println(x)\n}}",
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
        Concept::Typing => TYPING,
        Concept::Io => IO,
        Concept::Async => ASYNC,
        Concept::Comprehensions
        | Concept::Classes
        | Concept::Oop
        | Concept::Decorators
        | Concept::Regex => &[],
    }
}
