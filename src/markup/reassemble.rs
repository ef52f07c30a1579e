/// Join block texts into one document, one newline between blocks, order kept.
pub fn reassemble<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .map(|b| b.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_newline() {
        assert_eq!(reassemble(&["<A />", "<B />"]), "<A />\n<B />");
        assert_eq!(reassemble::<&str>(&[]), "");
    }
}
