use lj_types::{ClassId, MethodData, Type, TypeEnv};
use regex::Regex;

use crate::error::RefactorError;

/// A compiled AspectJ-flavored method-signature pattern, e.g.
/// `java.util.*List add*(java.lang.Object, ..)` (§4.D). Patterns have
/// three clauses, each compiled to its own regex so target-type
/// matching can walk the supertype chain independently of name/argument
/// matching:
///
/// - a target-type pattern, glob-style (`*` matches one name segment,
///   `**` matches any number, consistent with AspectJ's own type
///   pattern wildcards)
/// - a method-name pattern, glob-style (`*` matches any substring),
///   separated from the target-type pattern by whitespace per the
///   grammar (`typePattern WS namePattern`)
/// - an argument-list pattern: a comma-separated list of fully
///   qualified type names. Any element may be `..` ("zero or more
///   arguments here", and may appear anywhere in the list, not only
///   trailing) or `T...` (varargs: either a single `T[]` parameter or
///   zero or more individual `T` arguments).
#[derive(Debug, Clone)]
pub struct MethodPattern {
    source: String,
    target_regex: Regex,
    name_regex: Regex,
    args: Vec<ArgToken>,
}

#[derive(Debug, Clone)]
enum ArgToken {
    /// A single argument matching a fully qualified (possibly glob)
    /// type pattern.
    Type(Regex),
    /// Zero or more arguments, unconstrained.
    Gap,
    /// `T...`: either one `T[]` parameter, or zero or more individual
    /// `T` arguments.
    Varargs { element: Regex, array: Regex },
}

impl MethodPattern {
    pub fn compile(pattern: &str) -> Result<Self, RefactorError> {
        let invalid = |reason: &str| RefactorError::InvalidSignature {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let open = pattern
            .find('(')
            .ok_or_else(|| invalid("missing '(' opening the argument list"))?;
        if !pattern.ends_with(')') {
            return Err(invalid("argument list must end with ')'"));
        }

        let head = pattern[..open].trim();
        let (target, name) = head
            .rsplit_once(|c: char| c.is_whitespace())
            .ok_or_else(|| invalid("missing whitespace separating target type from method name"))?;
        let target = target.trim_end();
        let name = name.trim_start();
        let args_src = &pattern[open + 1..pattern.len() - 1];

        if target.is_empty() {
            return Err(invalid("target-type pattern must not be empty"));
        }
        if name.is_empty() {
            return Err(invalid("method-name pattern must not be empty"));
        }

        let target_regex = glob_to_regex(target, true);
        let name_regex = glob_to_regex(name, false);
        let args = compile_args(args_src, &invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            target_regex,
            name_regex,
            args,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `method` matches this pattern: its declaring type (or
    /// one of its supertypes) matches the target-type clause, its name
    /// matches the name clause, and its parameter types match the
    /// argument-list clause.
    pub fn matches(&self, env: &TypeEnv, method: &MethodData) -> bool {
        self.matches_target_type(env, method.declaring_type)
            && self.name_regex.is_match(&method.name)
            && self.matches_args(&method.param_types)
    }

    /// Whether `candidate` or any of its transitive supertypes/
    /// interfaces has a fully-qualified name matching the target-type
    /// clause (§4.D "the target-type pattern matches if the call's
    /// static receiver type, or any of its supertypes, matches").
    pub fn matches_target_type(&self, env: &TypeEnv, candidate: ClassId) -> bool {
        let mut stack = vec![candidate];
        let mut seen = std::collections::HashSet::new();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if self.target_regex.is_match(id.fully_qualified_name()) {
                return true;
            }
            if let Some(data) = env.class(id) {
                if let Some(sup) = data.supertype {
                    stack.push(sup);
                }
                stack.extend(data.interfaces.iter().copied());
            }
        }
        false
    }

    fn matches_args(&self, params: &[Type]) -> bool {
        let names: Vec<String> = params.iter().map(type_fqn).collect();
        match_tokens(&self.args, &names)
    }
}

/// Matches `names` against `tokens` left to right: a `Gap` or
/// `Varargs` token may consume any number of elements, so this
/// backtracks the way glob matching over a string does, just over a
/// list of resolved type names instead of characters.
fn match_tokens(tokens: &[ArgToken], names: &[String]) -> bool {
    match tokens.split_first() {
        None => names.is_empty(),
        Some((ArgToken::Type(re), rest)) => {
            !names.is_empty() && re.is_match(&names[0]) && match_tokens(rest, &names[1..])
        }
        Some((ArgToken::Gap, rest)) => (0..=names.len()).any(|i| match_tokens(rest, &names[i..])),
        Some((ArgToken::Varargs { element, array }, rest)) => {
            if !names.is_empty() && array.is_match(&names[0]) && match_tokens(rest, &names[1..]) {
                return true;
            }
            let mut consumed = 0;
            loop {
                if match_tokens(rest, &names[consumed..]) {
                    return true;
                }
                if consumed >= names.len() || !element.is_match(&names[consumed]) {
                    return false;
                }
                consumed += 1;
            }
        }
    }
}

fn type_fqn(ty: &Type) -> String {
    match ty {
        Type::Class(id) => id.fully_qualified_name().to_string(),
        Type::Array(a) => format!("{}[]", type_fqn(&a.element)),
        Type::Primitive(tag) => format!("{tag:?}").to_lowercase(),
        Type::GenericTypeVariable(v) => v.name.clone(),
        Type::Method(_) | Type::Var(_) => String::new(),
    }
}

fn compile_args(
    args: &str,
    invalid: &impl Fn(&str) -> RefactorError,
) -> Result<Vec<ArgToken>, RefactorError> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let mut tokens = Vec::with_capacity(parts.len());
    for part in parts {
        if part.is_empty() {
            return Err(invalid("empty argument type in argument list"));
        }
        if part == ".." {
            tokens.push(ArgToken::Gap);
        } else if let Some(element) = part.strip_suffix("...") {
            if element.is_empty() {
                return Err(invalid("varargs element type must not be empty"));
            }
            tokens.push(ArgToken::Varargs {
                element: arg_type_regex(element),
                array: array_type_regex(element),
            });
        } else {
            tokens.push(ArgToken::Type(arg_type_regex(part)));
        }
    }
    Ok(tokens)
}

/// The unanchored regex body for a glob pattern. `*` matches within a
/// single dotted segment; `**` (only meaningful when `dotted`) matches
/// across segment boundaries, mirroring AspectJ's own type-pattern
/// wildcards.
fn glob_to_pattern(glob: &str, dotted: bool) -> String {
    let mut out = String::new();
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if dotted && chars.peek() == Some(&'*') {
                    chars.next();
                    out.push_str(".*");
                } else if dotted {
                    out.push_str("[^.]*");
                } else {
                    out.push_str(".*");
                }
            }
            '.' => out.push_str("\\."),
            other => {
                for escaped in regex::escape(&other.to_string()).chars() {
                    out.push(escaped);
                }
            }
        }
    }
    out
}

fn glob_to_regex(glob: &str, dotted: bool) -> Regex {
    Regex::new(&format!("^{}$", glob_to_pattern(glob, dotted)))
        .expect("glob_to_regex always produces a valid regex")
}

/// The regex body for an argument-type pattern, applying §4.D's
/// unqualified-`java.lang` rule: a bare identifier with no `.` also
/// matches the same name under `java.lang.`, since `Type::Class` names
/// are always fully qualified but a pattern author writing `String`
/// means `java.lang.String` just as often as a literal type named
/// `String` in the default package.
fn type_pattern_body(pattern: &str) -> String {
    let body = glob_to_pattern(pattern, true);
    if pattern.contains('.') {
        body
    } else {
        let qualified = glob_to_pattern(&format!("java.lang.{pattern}"), true);
        format!("(?:{body}|{qualified})")
    }
}

fn arg_type_regex(pattern: &str) -> Regex {
    Regex::new(&format!("^{}$", type_pattern_body(pattern)))
        .expect("arg_type_regex always produces a valid regex")
}

/// The regex matching `element`'s resolved array form (`T[]`), for
/// `T...` varargs parameters declared as an array.
fn array_type_regex(element: &str) -> Regex {
    Regex::new(&format!("^{}\\[\\]$", type_pattern_body(element)))
        .expect("array_type_regex always produces a valid regex")
}
