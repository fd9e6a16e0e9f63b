//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Cuts on a char boundary so multi-byte text never splits mid-character.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("ping", 10), "ping");
  }

  #[test]
  fn truncates_on_char_boundary() {
    // 'é' is two bytes; cutting at 2 would split it
    let out = trunc_for_log("aé bcdef", 2);
    assert!(out.starts_with("a…"));
    assert!(out.ends_with("(9 bytes total)"));
  }
}
