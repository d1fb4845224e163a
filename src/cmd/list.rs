/*!
`list.rs`

Handlers behind the `list` group:

  list dir   [--path DIR] [--all]   entry names, directories suffixed with `/`
  list files [--path DIR] [--ext EXT]  regular files only

Both return a JSON array of names sorted alphabetically.
*/

use anyhow::{Context, Result};
use endpoint_cli::CallArgs;
use serde_json::Value;
use std::path::Path;

struct Entry {
    name: String,
    is_dir: bool,
}

fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn list_dir(args: CallArgs) -> Result<Value> {
    let path = args.str(0, "path").unwrap_or(".");
    let all = args.flag(1, "all");

    let names = read_entries(Path::new(path))?
        .into_iter()
        .filter(|e| all || !e.name.starts_with('.'))
        .map(|e| {
            if e.is_dir {
                Value::String(format!("{}/", e.name))
            } else {
                Value::String(e.name)
            }
        })
        .collect();
    Ok(Value::Array(names))
}

pub fn list_files(args: CallArgs) -> Result<Value> {
    let path = args.str(0, "path").unwrap_or(".");
    let ext = args.str(1, "ext").unwrap_or("").trim_start_matches('.');

    let names = read_entries(Path::new(path))?
        .into_iter()
        .filter(|e| !e.is_dir)
        .filter(|e| {
            ext.is_empty()
                || Path::new(&e.name)
                    .extension()
                    .is_some_and(|x| x.eq_ignore_ascii_case(ext))
        })
        .map(|e| Value::String(e.name))
        .collect();
    Ok(Value::Array(names))
}
