use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::engine::{Block, Configuration, Move};
use crate::error::{ConfigurationError, ProblemError};

/// Where `ai_solver` writes its plan when no output file is given.
pub const DEFAULT_SOLUTION_FILE: &str = "solution.txt";

/// A parsed planning problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// The name from `(problem NAME)`, if present.
    pub name: Option<String>,
    /// Blocks in the order they were declared.
    pub blocks: Vec<Block>,
    pub initial: Configuration,
    pub goal: Configuration,
}

/// Builds a configuration from block names and `(upper, lower)` pairs.
///
/// Blocks that appear as no pair's `upper` rest on the table.
///
/// # Examples
/// ```
/// use blocks_world_solver::utils::configuration_from_pairs;
/// let config = configuration_from_pairs(&["A", "B"], &[("A", "B")]).unwrap();
/// assert_eq!(config.is_clear("A"), Some(true));
/// assert_eq!(config.is_clear("B"), Some(false));
///
/// assert!(configuration_from_pairs(&["A"], &[("A", "A")]).is_err());
/// ```
pub fn configuration_from_pairs(
    blocks: &[&str],
    on: &[(&str, &str)],
) -> Result<Configuration, ConfigurationError> {
    let blocks: Vec<Block> = blocks.iter().map(|&name| Block::new(name)).collect();
    let on: Vec<(Block, Block)> = on
        .iter()
        .map(|&(upper, lower)| (Block::new(upper), Block::new(lower)))
        .collect();
    Configuration::from_on_relations(&blocks, &on)
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(atom) => write!(f, "{}", atom),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Parser)]
#[grammar = "pddl.pest"]
struct ProblemParser;

fn to_sexpr(pair: Pair<'_, Rule>) -> SExpr {
    match pair.as_rule() {
        Rule::list => SExpr::List(pair.into_inner().map(to_sexpr).collect()),
        Rule::atom => SExpr::Atom(pair.as_str().to_string()),
        rule => unreachable!("{rule:?}, {}", pair.as_str()),
    }
}

// Splits the text into top-level s-expressions. `;` starts a comment that
// runs to the end of the line.
fn parse_sexprs(text: &str) -> Result<Vec<SExpr>, ProblemError> {
    let file = ProblemParser::parse(Rule::file, text).map_err(Box::new)?;
    Ok(file
        .flat_map(|pair| pair.into_inner())
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(to_sexpr)
        .collect())
}

// Finds the first list, at any depth, whose head atom is `head`, and returns
// the items after the head.
fn find_section<'a>(forms: &'a [SExpr], head: &str) -> Option<&'a [SExpr]> {
    forms.iter().find_map(|form| match form {
        SExpr::List(items) => match items.first() {
            Some(SExpr::Atom(first)) if first.eq_ignore_ascii_case(head) => Some(&items[1..]),
            _ => find_section(items, head),
        },
        SExpr::Atom(_) => None,
    })
}

fn resolve(name: &str, known: &HashMap<&str, &Block>) -> Result<Block, ProblemError> {
    known
        .get(name)
        .map(|&block| block.clone())
        .ok_or_else(|| ProblemError::UnknownObject(name.to_string()))
}

// Collects every (ON x y) under `items`, descending into AND. Other
// predicates are implied by the ON relations and only have their
// arguments checked.
fn collect_on(
    items: &[SExpr],
    known: &HashMap<&str, &Block>,
    on: &mut Vec<(Block, Block)>,
) -> Result<(), ProblemError> {
    for item in items {
        let SExpr::List(inner) = item else {
            continue;
        };
        let Some(SExpr::Atom(head)) = inner.first() else {
            return Err(ProblemError::MalformedPredicate(item.to_string()));
        };

        if head.eq_ignore_ascii_case("and") {
            collect_on(&inner[1..], known, on)?;
        } else if head.eq_ignore_ascii_case("on") {
            match &inner[1..] {
                [SExpr::Atom(upper), SExpr::Atom(lower)] => {
                    on.push((resolve(upper, known)?, resolve(lower, known)?));
                }
                _ => return Err(ProblemError::MalformedPredicate(item.to_string())),
            }
        } else {
            for argument in &inner[1..] {
                match argument {
                    SExpr::Atom(name) => {
                        resolve(name, known)?;
                    }
                    SExpr::List(_) => {
                        return Err(ProblemError::MalformedPredicate(item.to_string()))
                    }
                }
            }
        }
    }
    Ok(())
}

/// Parses a BLOCKS-domain problem description.
///
/// Recognised sections are `:objects`, `:init` and `:goal` (any case).
/// Every object starts alone on the table and clear; each `(ON x y)` puts
/// `x` on `y`. `CLEAR`, `ONTABLE` and `HANDEMPTY` are implied by the `ON`
/// relations and are not needed. Typed object lists (`A B - block`) are
/// accepted and the type names are dropped.
///
/// # Errors
/// Returns a `ProblemError` for text that is not well-formed s-expressions,
/// a missing section, a predicate naming an undeclared object, a malformed
/// `ON`, or a resulting configuration that breaks the stacking rules.
pub fn parse_problem(text: &str) -> Result<Problem, ProblemError> {
    let forms = parse_sexprs(text)?;

    let objects = find_section(&forms, ":objects").ok_or(ProblemError::MissingSection(":objects"))?;
    let init = find_section(&forms, ":init").ok_or(ProblemError::MissingSection(":init"))?;
    let goal = find_section(&forms, ":goal").ok_or(ProblemError::MissingSection(":goal"))?;
    let name = find_section(&forms, "problem").and_then(|rest| match rest.first() {
        Some(SExpr::Atom(name)) => Some(name.clone()),
        _ => None,
    });

    let mut blocks: Vec<Block> = Vec::new();
    let mut skip_type = false;
    for object in objects {
        match object {
            SExpr::Atom(atom) if atom == "-" => skip_type = true,
            SExpr::Atom(_) if skip_type => skip_type = false,
            SExpr::Atom(atom) => {
                if !blocks.iter().any(|block| block.name() == atom) {
                    blocks.push(Block::new(atom));
                }
            }
            SExpr::List(_) => return Err(ProblemError::MalformedPredicate(object.to_string())),
        }
    }

    let known: HashMap<&str, &Block> = blocks.iter().map(|block| (block.name(), block)).collect();

    let mut init_on = Vec::new();
    collect_on(init, &known, &mut init_on)?;
    let mut goal_on = Vec::new();
    collect_on(goal, &known, &mut goal_on)?;

    let initial = Configuration::from_on_relations(&blocks, &init_on).map_err(|source| {
        ProblemError::InvalidConfiguration {
            section: "initial",
            source,
        }
    })?;
    let goal = Configuration::from_on_relations(&blocks, &goal_on).map_err(|source| {
        ProblemError::InvalidConfiguration {
            section: "goal",
            source,
        }
    })?;

    Ok(Problem {
        name,
        blocks,
        initial,
        goal,
    })
}

/// Reads and parses a problem file.
pub fn read_problem(path: &Path) -> Result<Problem, ProblemError> {
    let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_problem(&text)
}

/// Renders a plan as numbered lines, e.g. `1. Move(A, B, table)`.
pub fn format_solution(moves: &[Move]) -> String {
    moves
        .iter()
        .enumerate()
        .map(|(i, mv)| format!("{}. {}\n", i + 1, mv))
        .collect()
}

pub fn write_solution(path: &Path, moves: &[Move]) -> std::io::Result<()> {
    fs::write(path, format_solution(moves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Support;
    use pest::error::LineColLocation;

    const SCENARIO: &str = "
        (define (problem BW-rand-3)
        (:domain BLOCKS)
        (:objects A B C)
        (:INIT (CLEAR A) (ON A B) (ON B C) (ONTABLE C) (HANDEMPTY))
        (:goal (AND (ON C B) (ON B A)))
        )";

    #[test]
    fn test_parse_problem_scenario() {
        let problem = parse_problem(SCENARIO).unwrap();
        assert_eq!(problem.name.as_deref(), Some("BW-rand-3"));
        assert_eq!(
            problem.blocks.iter().map(Block::name).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            problem.initial,
            configuration_from_pairs(&["A", "B", "C"], &[("A", "B"), ("B", "C")]).unwrap()
        );
        assert_eq!(
            problem.goal,
            configuration_from_pairs(&["A", "B", "C"], &[("C", "B"), ("B", "A")]).unwrap()
        );
    }

    #[test]
    fn test_parse_problem_keeps_declaration_order_and_types() {
        let text = "(define (problem p) ; comment (ignored
            (:objects D b A - block)
            (:init (on D A))
            (:goal (and)))";
        let problem = parse_problem(text).unwrap();
        assert_eq!(
            problem.blocks.iter().map(Block::name).collect::<Vec<_>>(),
            vec!["D", "b", "A"]
        );
        assert_eq!(
            problem.initial.support_of("D"),
            Some(&Support::Block(Block::new("A")))
        );
        assert_eq!(problem.goal, Configuration::all_on_table(["A", "D", "b"]));
    }

    #[test]
    fn test_parse_problem_missing_section() {
        let result = parse_problem("(define (:objects A) (:init))");
        assert!(matches!(result, Err(ProblemError::MissingSection(":goal"))));
    }

    #[test]
    fn test_parse_problem_unknown_object() {
        let result = parse_problem("(define (:objects A B) (:init (ON A Z)) (:goal (AND)))");
        assert!(matches!(result, Err(ProblemError::UnknownObject(name)) if name == "Z"));

        let result = parse_problem("(define (:objects A) (:init (CLEAR Q)) (:goal (AND)))");
        assert!(matches!(result, Err(ProblemError::UnknownObject(name)) if name == "Q"));
    }

    #[test]
    fn test_parse_problem_malformed_on() {
        let result = parse_problem("(define (:objects A B) (:init (ON A)) (:goal (AND)))");
        assert!(matches!(result, Err(ProblemError::MalformedPredicate(text)) if text == "(ON A)"));
    }

    #[test]
    fn test_parse_problem_unbalanced() {
        assert!(matches!(
            parse_problem("(define (:objects A)"),
            Err(ProblemError::Syntax(_))
        ));
        match parse_problem("(:objects A))") {
            Err(ProblemError::Syntax(e)) => {
                assert_eq!(e.line_col, LineColLocation::Pos((1, 13)));
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_sexprs_comments_and_nesting() {
        let forms = parse_sexprs("; header\n(a (b c) ; trailing\n d)\ne").unwrap();
        assert_eq!(
            forms,
            vec![
                SExpr::List(vec![
                    SExpr::Atom("a".to_string()),
                    SExpr::List(vec![SExpr::Atom("b".to_string()), SExpr::Atom("c".to_string())]),
                    SExpr::Atom("d".to_string()),
                ]),
                SExpr::Atom("e".to_string()),
            ]
        );
        assert_eq!(forms[0].to_string(), "(a (b c) d)");
        assert!(parse_sexprs("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_problem_invalid_goal() {
        let text = "(define (:objects A B) (:init) (:goal (AND (ON A B) (ON B A))))";
        let result = parse_problem(text);
        assert!(matches!(
            result,
            Err(ProblemError::InvalidConfiguration {
                section: "goal",
                source: ConfigurationError::Cycle(_),
            })
        ));
    }

    #[test]
    fn test_read_problem_bundled_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("problems");
        let small = read_problem(&dir.join("probBLOCKS-3-0.pddl")).unwrap();
        assert_eq!(small.blocks.len(), 3);
        let larger = read_problem(&dir.join("probBLOCKS-6-0.pddl")).unwrap();
        assert_eq!(larger.blocks.len(), 6);
        assert_ne!(larger.initial, larger.goal);
    }

    #[test]
    fn test_read_problem_missing_file() {
        let result = read_problem(Path::new("definitely/not/here.pddl"));
        assert!(matches!(result, Err(ProblemError::Io { .. })));
    }

    #[test]
    fn test_format_and_write_solution() {
        let moves = vec![
            Move {
                object: Block::new("A"),
                from: Support::Block(Block::new("B")),
                to: Support::Table,
            },
            Move {
                object: Block::new("B"),
                from: Support::Block(Block::new("C")),
                to: Support::Block(Block::new("A")),
            },
        ];
        let expected = "1. Move(A, B, table)\n2. Move(B, C, A)\n";
        assert_eq!(format_solution(&moves), expected);
        assert_eq!(format_solution(&[]), "");

        let path = std::env::temp_dir().join(format!("blocks-solution-{}.txt", std::process::id()));
        write_solution(&path, &moves).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        fs::remove_file(&path).unwrap();
    }
}
