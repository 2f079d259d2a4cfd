use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;

/// Indentation unit used by every built-in fragment.
pub const INDENT: &str = "    ";

pub fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// A randomized argument slot of a fragment template. Ranges are inclusive.
#[derive(Clone, Copy, Debug)]
pub enum Param {
    Int { min: i64, max: i64 },
    Pick(&'static [&'static str]),
    IntList {
        min_len: usize,
        max_len: usize,
        min: i64,
        max: i64,
    },
}

impl Param {
    pub fn is_valid(&self) -> bool {
        match *self {
            Param::Int { min, max } => min <= max,
            Param::Pick(pool) => !pool.is_empty(),
            Param::IntList {
                min_len,
                max_len,
                min,
                max,
            } => min_len <= max_len && min <= max,
        }
    }

    fn draw(&self, rng: &mut SmallRng) -> Value {
        match *self {
            Param::Int { min, max } => Value::Int(rng.gen_range(min..=max)),
            Param::Pick(pool) => Value::Word(pool[rng.gen_range(0..pool.len())]),
            Param::IntList {
                min_len,
                max_len,
                min,
                max,
            } => {
                let len = rng.gen_range(min_len..=max_len);
                Value::List((0..len).map(|_| rng.gen_range(min..=max)).collect())
            }
        }
    }
}

/// A drawn argument, handed to the render function in param order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Word(&'static str),
    List(Vec<i64>),
}

impl Value {
    pub fn int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::List(items) => items.len() as i64,
            Value::Word(_) => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Word(w) => f.write_str(w),
            Value::List(items) => {
                for (i, n) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            }
        }
    }
}

/// One entry of the snippet registry: the parameter slots plus the renderer.
pub struct FragmentSpec {
    pub name: &'static str,
    pub params: &'static [Param],
    pub render: fn(&[Value]) -> String,
}

impl FragmentSpec {
    pub fn draw(&self, rng: &mut SmallRng) -> Vec<Value> {
        self.params.iter().map(|p| p.draw(rng)).collect()
    }

    pub fn render_with(&self, rng: &mut SmallRng) -> String {
        let args = self.draw(rng);
        (self.render)(&args)
    }
}

impl fmt::Debug for FragmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentSpec")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

// Shared pools.
pub const LOOP_VARS: &[&str] = &["i", "j", "k", "idx", "n", "m", "row", "col"];
pub const LIST_NAMES: &[&str] = &["nums", "letters", "items", "arr", "values"];
pub const WORDS: &[&str] = &["alpha", "beta", "cat", "dog", "hello", "world"];
pub const NAMES: &[&str] = &["daniel", "ada", "linus", "grace", "ken"];
pub const BOOLS_PY: &[&str] = &["True", "False"];
pub const BOOLS: &[&str] = &["true", "false"];
