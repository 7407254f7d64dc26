//! Plain-text dump of every file, in fetch order.

use crate::models::FlatFile;

pub fn concatenate(files: &[FlatFile]) -> String {
    let capacity = files
        .iter()
        .map(|f| f.path.len() + f.content.len() + 24)
        .sum();
    let mut out = String::with_capacity(capacity);

    for file in files {
        out.push_str("====== File: ");
        out.push_str(&file.path);
        out.push_str(" ======\n");
        out.push_str(&file.content);
        out.push_str("\n\n");
    }

    out
}
