/// Two-letter initials for a display name: first and last word initials for multi-word
/// names, otherwise the first two characters. Uppercased. Blank names give `"??"`.
pub fn initials_for(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let raw: String = match words.as_slice() {
        [] => return "??".to_string(),
        [single] => single.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    raw.to_uppercase()
}

/// `base`, or the first of `base1`, `base2`, ... that `taken` rejects.
pub fn disambiguate(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_for_multi_word_uses_first_and_last() {
        assert_eq!(initials_for("Kevin Vu"), "KV");
        assert_eq!(initials_for("  mary   ann  poppins "), "MP");
    }

    #[test]
    fn initials_for_single_word_uses_two_chars() {
        assert_eq!(initials_for("Nina"), "NI");
        assert_eq!(initials_for("j"), "J");
        assert_eq!(initials_for("   "), "??");
    }

    #[test]
    fn disambiguate_appends_counter() {
        let taken = ["KV", "KV1"];
        assert_eq!(disambiguate("AT", |c| taken.contains(&c)), "AT");
        assert_eq!(disambiguate("KV", |c| taken.contains(&c)), "KV2");
    }
}
