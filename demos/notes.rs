//! Notes demo: an in-memory database, typed preferences and a temp folder
//! composed through one registry.
//!
//! Run with `RUST_LOG=debug cargo run --example notes`.

use std::path::Path;
use std::sync::Arc;
use stowage::prelude::*;

#[model]
#[table(name = "note")]
pub struct Note {
    #[primary_key]
    pub id: String,

    pub title: String,

    #[column(name = "createdAt", type = "DATE")]
    pub created_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = StorageRegistry::new();
    let storage = StorageBuilder::new()
        .database(DatabaseOption::embedded(":memory:"))
        .preferences(PreferencesOption::external(
            Arc::new(MemoryPreferences::new()),
            "demo",
        ))
        .files(FileOption::directory(BaseDirectory::Temporary, "stowage-demo"))
        .sync(SyncOption::None)
        .build(&registry)?;

    let signals = Arc::new(SignalManager::new());
    signals.add_callback(|event: &ChangeEvent| {
        println!("{:?} {} {:?}", event.change_type, event.table, event.record_id);
    });

    let notes = storage.record_store::<Note>(Some(signals)).await?;
    for (id, title) in [("n1", "buy food"), ("n2", "call bob"), ("n3", "food blog")] {
        notes
            .create(Note {
                id: id.to_string(),
                title: title.to_string(),
                created_at: Utc::now(),
            })
            .await?;
    }

    let query = QueryBuilder::new()
        .filter(QueryFilter::like("title", "%food%"))
        .order_by("createdAt", SortDirection::Descending);
    println!("{}", query.clone().select_from("note").compile().sql);
    for note in notes.find(query).await? {
        println!("  {} {}", note.id, note.title);
    }

    if let Some(preferences) = &storage.preferences {
        let typed = TypedPreferences::new(Arc::clone(preferences));
        typed.set("last_opened", &Utc::now()).await?;
        println!("last opened: {:?}", typed.get::<DateTime<Utc>>("last_opened").await?);
    }

    if let Some(files) = &storage.files {
        let path = files.save(b"attachment", Path::new("n1/readme.txt")).await?;
        println!("saved {}", path.display());
        files.delete(Path::new("n1/readme.txt")).await?;
    }

    Ok(())
}
