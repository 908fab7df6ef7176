use unicode_width::UnicodeWidthStr;

/// Greedy word wrap measured in terminal columns.
///
/// Breaks only on whitespace, so a word wider than `width` gets a line of its
/// own rather than being split. Runs of whitespace collapse to a single space.
/// Empty or all-whitespace input yields no lines.
pub fn wrap(text: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current.is_empty() {
            let indent = if lines.is_empty() {
                initial_indent
            } else {
                subsequent_indent
            };
            current.push_str(indent);
            current.push_str(word);
            current_width = indent.width() + word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(subsequent_indent);
            current.push_str(word);
            current_width = subsequent_indent.width() + word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
