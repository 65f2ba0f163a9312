//! PGN movetext handling
//!
//! Votes arrive as PGN movetext of the whole game including the proposed
//! move (`1. e4 e5 2. Nf3`). This module splits movetext into SAN tokens and
//! renders a SAN list back to movetext. Move legality is not checked here.

/// Split PGN movetext into SAN move tokens.
///
/// Skips move numbers (`1.`, `12...`), results (`1-0`, `0-1`, `1/2-1/2`,
/// `*`), `{...}` and `;` comments, NAGs (`$3`) and trailing `!`/`?`
/// annotation glyphs. A number glued to a move (`1.e4`) is split off.
pub fn tokenize_movetext(movetext: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut in_brace_comment = false;

    for line in movetext.lines() {
        let mut line_rest = line;

        loop {
            if in_brace_comment {
                match line_rest.find('}') {
                    Some(end) => {
                        in_brace_comment = false;
                        line_rest = &line_rest[end + 1..];
                    }
                    None => break,
                }
            }

            // Rest-of-line comment ends this line
            let (chunk, rest, opens_comment) = match (line_rest.find('{'), line_rest.find(';')) {
                (Some(b), Some(s)) if s < b => (&line_rest[..s], "", false),
                (Some(b), _) => (&line_rest[..b], &line_rest[b + 1..], true),
                (None, Some(s)) => (&line_rest[..s], "", false),
                (None, None) => (line_rest, "", false),
            };

            for word in chunk.split_whitespace() {
                if let Some(san) = clean_token(word) {
                    tokens.push(san);
                }
            }

            if opens_comment {
                in_brace_comment = true;
                line_rest = rest;
            } else {
                break;
            }
        }
    }

    tokens
}

fn clean_token(word: &str) -> Option<String> {
    if word.starts_with('$') || is_result(word) {
        return None;
    }

    // "12." / "12..." / "1.e4"
    let word = word.trim_start_matches(|c: char| c.is_ascii_digit());
    let word = word.trim_start_matches('.');
    let word = word.trim_end_matches(['!', '?']);

    if word.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}

fn is_result(word: &str) -> bool {
    matches!(word, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Render SAN moves from the standard start as numbered movetext.
///
/// `["e4", "e5", "Nf3"]` becomes `1. e4 e5 2. Nf3`.
pub fn render_movetext<S: AsRef<str>>(moves: &[S]) -> String {
    let mut out = String::new();

    for (ply, san) in moves.iter().enumerate() {
        if ply % 2 == 0 {
            if ply > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{}. ", ply / 2 + 1));
        } else {
            out.push(' ');
        }
        out.push_str(san.as_ref());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain_movetext() {
        assert_eq!(
            tokenize_movetext("1. e4 e5 2. Nf3 Nc6"),
            vec!["e4", "e5", "Nf3", "Nc6"]
        );
    }

    #[test]
    fn test_tokenize_glued_numbers_and_black_continuation() {
        assert_eq!(tokenize_movetext("1.e4 1...e5 2.Nf3"), vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_tokenize_skips_results_comments_and_nags() {
        let movetext = "1. e4 {best by test} e5 $1 2. Nf3!? ; a comment\n Nc6 *";
        assert_eq!(tokenize_movetext(movetext), vec!["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn test_tokenize_multiline_brace_comment() {
        let movetext = "1. d4 {opens\nthe game} d5";
        assert_eq!(tokenize_movetext(movetext), vec!["d4", "d5"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize_movetext("").is_empty());
        assert!(tokenize_movetext("  1-0 ").is_empty());
    }

    #[test]
    fn test_render_movetext() {
        assert_eq!(render_movetext::<&str>(&[]), "");
        assert_eq!(render_movetext(&["e4"]), "1. e4");
        assert_eq!(render_movetext(&["e4", "e5", "Nf3"]), "1. e4 e5 2. Nf3");
    }
}
