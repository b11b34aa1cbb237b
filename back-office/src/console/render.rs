//! Plain-text column layout

use std::fmt;

/// Rows rendered as left-aligned columns under a header line
#[derive(Debug, Default)]
pub struct TextTable {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width - cell.chars().count()));
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, self.headers.iter().copied(), &widths)?;
        for row in &self.rows {
            write_line(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

/// `-` for missing optional values
pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align() {
        let mut table = TextTable::new(&["ID", "NAME", "PRICE"]);
        table.row(["1", "Bruschetta", "6.50"]);
        table.row(["12", "Soup", "5.00"]);

        let text = table.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "ID  NAME        PRICE");
        assert_eq!(lines[1], "1   Bruschetta  6.50");
        assert_eq!(lines[2], "12  Soup        5.00");
    }

    #[test]
    fn test_opt() {
        assert_eq!(opt(Some(3)), "3");
        assert_eq!(opt(None::<i64>), "-");
    }
}
