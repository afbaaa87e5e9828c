//! Simple decoder to inspect serialized datastore entities.

use std::fs;

use datastore_codec::{decode_entity, Entity, FlatPathItem, Key, KeyId, Value};

fn format_key(key: &Key) -> String {
    let path: Vec<String> = key
        .flat_path()
        .iter()
        .map(|item| match item {
            FlatPathItem::Kind(kind) => kind.to_string(),
            FlatPathItem::Id(KeyId::Id(id)) => id.to_string(),
            FlatPathItem::Id(KeyId::Name(name)) => format!("{:?}", name),
        })
        .collect();
    let mut formatted = format!("Key({})", path.join(", "));
    if let Some(dataset_id) = key.dataset_id() {
        formatted.push_str(&format!(" dataset={}", dataset_id));
    }
    if let Some(namespace) = key.namespace() {
        formatted.push_str(&format!(" namespace={}", namespace));
    }
    formatted
}

fn format_value(v: &Value, indent: usize) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => format!("{}", b),
        Value::Integer(i) => format!("{}", i),
        Value::Double(f) => format!("{:.6}", f),
        Value::Timestamp(t) => format!("TIMESTAMP({})", t.to_rfc3339()),
        Value::String(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Blob(b) => format!("BLOB[{}]", b.len()),
        Value::Key(k) => format_key(k),
        Value::Entity(e) => format!("ENTITY\n{}", format_properties(e, indent + 2)),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(|item| format_value(item, indent)).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn format_properties(entity: &Entity, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut lines = Vec::with_capacity(entity.len());
    for property in entity {
        let mut flags = Vec::new();
        if property.excluded {
            flags.push("unindexed".to_string());
        }
        if let Some(meaning) = property.current_meaning() {
            flags.push(format!("meaning={}", meaning));
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        lines.push(format!(
            "{}{}{}: {}",
            pad,
            property.name,
            flags,
            format_value(&property.value, indent)
        ));
    }
    lines.join("\n")
}

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: decode_file <entity.pb>");
        std::process::exit(2);
    };

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let entity = decode_entity(&data).expect("Failed to decode");

    println!("\n=== Entity ===");
    match entity.key() {
        Some(key) => println!("Key: {}", format_key(key)),
        None => println!("Key: (none)"),
    }

    println!("\n=== Properties ({}) ===", entity.len());
    println!("{}", format_properties(&entity, 2));

    let excluded: Vec<&str> = entity.excluded().collect();
    if !excluded.is_empty() {
        println!("\nExcluded from indexes: {}", excluded.join(", "));
    }
}
