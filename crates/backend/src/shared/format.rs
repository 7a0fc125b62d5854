/// Разбивает число на триады, вставляя `separator` между ними
pub fn format_number(n: usize, separator: char) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Размер ответа для лога запросов: байты до 10 KB, дальше килобайты
pub fn format_size(bytes: usize) -> String {
    if bytes < 10 * 1024 {
        format!("{} B", format_number(bytes, '.'))
    } else {
        format!("{} KB", format_number(bytes.div_ceil(1024), '.'))
    }
}
