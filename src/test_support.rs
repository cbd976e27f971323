/// `n` space-separated words.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}
