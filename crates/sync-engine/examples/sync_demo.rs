//! Demonstration of sync engine capabilities

use shelfmate_core::Book;
use shelfmate_sync_engine::{InMemoryStore, SyncConfig, SyncEngine};

fn titled(id: &str, title: &str) -> Book {
    let mut book = Book::new(id);
    book.title = Some(title.to_string());
    book
}

fn main() {
    println!("Shelfmate Sync Engine Demo");
    println!("==========================\n");

    let local = vec![
        titled("dune", "Dune"),
        titled("hyperion", "Hyperion"),
        titled("anathem", "Anathem"),
    ];
    let mut remote = InMemoryStore::with_books(vec![
        titled("hyperion", "Hyperion"),
        titled("neuromancer", "Neuromancer"),
    ]);

    println!("1. Dry run");
    let preview = SyncEngine::new(SyncConfig::dry_run());
    match preview.sync(&local, &mut remote) {
        Ok(report) => {
            println!("  would push:   {:?}", report.pushed);
            println!("  would remove: {:?}", report.removed);
        }
        Err(e) => println!("  dry run failed: {}", e),
    }

    println!("\n2. Real sync");
    let engine = SyncEngine::new(SyncConfig::default());
    match engine.sync(&local, &mut remote) {
        Ok(report) => println!("  ✓ {} changes applied", report.total_changes()),
        Err(e) => println!("  sync failed: {}", e),
    }

    println!("\n3. Remote store now holds:");
    for book in remote.books() {
        println!("  - {} ({})", book.title_or_empty(), book.id);
    }
}
