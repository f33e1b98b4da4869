use anyhow::Result;
use clap::{Parser, Subcommand};
use siteplan_core::{HierarchyDocument, PageId, ROOT_PAGE_ID};
use siteplan_engine::{DocumentOrigin, HierarchyStore, Mutation, StoreEvent};
use siteplan_graph::children_of;
use siteplan_storage::{EXPORT_FILE_NAME, Storage};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Edit a website's page hierarchy from the terminal.
#[derive(Parser, Debug)]
#[command(name = "siteplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database (defaults to the platform data dir)
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the page tree with section ids
    Show,
    /// Add a page under a parent
    AddPage {
        /// Parent page id
        parent: String,
        /// Human name; the id is derived from it
        name: String,
    },
    /// Delete a page and everything underneath it
    RmPage {
        /// Page id
        id: String,
    },
    /// Link two existing pages
    Connect {
        /// Source page id
        source: String,
        /// Target page id
        target: String,
    },
    /// Append a section to a page
    AddSection {
        /// Page id
        page: String,
        /// Section name; the id is derived from it
        name: String,
    },
    /// Remove a section from a page
    RmSection {
        /// Page id
        page: String,
        /// Section id
        section: String,
    },
    /// Move a section to a new position on its page
    MoveSection {
        /// Page id
        page: String,
        /// Current index (0-based)
        from: usize,
        /// Target index (0-based)
        to: usize,
    },
    /// Write the current document to a JSON file
    Export {
        /// Output path
        #[arg(default_value = EXPORT_FILE_NAME)]
        path: PathBuf,
    },
    /// Replace the document with the contents of a JSON file
    Import {
        /// Input path
        path: PathBuf,
    },
    /// Persist the current document to the storage slot
    Save,
    /// Restore the starter site and persist it
    Reset,
    /// Empty the storage slot, keeping the working document
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let storage = match &cli.db {
        Some(path) => Storage::open(path)?,
        None => Storage::open_default()?,
    };
    let store = HierarchyStore::new(storage);
    let events = store.subscribe();
    store.load()?;

    match cli.command {
        Command::Show => show(&store),
        Command::AddPage { parent, name } => {
            store.apply(Mutation::AddPage {
                parent: PageId::from(parent),
                name,
            })?;
            store.save()?;
        }
        Command::RmPage { id } => {
            store.apply(Mutation::DeletePage {
                id: PageId::from(id),
            })?;
            store.save()?;
        }
        Command::Connect { source, target } => {
            store.apply(Mutation::Connect {
                source: PageId::from(source),
                target: PageId::from(target),
            })?;
            store.save()?;
        }
        Command::AddSection { page, name } => {
            store.apply(Mutation::AddSection {
                page: PageId::from(page),
                name,
            })?;
            store.save()?;
        }
        Command::RmSection { page, section } => {
            store.apply(Mutation::DeleteSection {
                page: PageId::from(page),
                section_id: section,
            })?;
            store.save()?;
        }
        Command::MoveSection { page, from, to } => {
            store.apply(Mutation::ReorderSections {
                page: PageId::from(page),
                from,
                to,
            })?;
            store.save()?;
        }
        Command::Export { path } => {
            store.export_to_file(&path)?;
            println!("exported to {}", path.display());
        }
        Command::Import { path } => {
            store.import_from_file(&path).await?;
            store.save()?;
        }
        Command::Save => store.save()?,
        Command::Reset => {
            store.reset();
            store.save()?;
        }
        Command::Clear => {
            store.clear_saved()?;
            println!("storage slot cleared");
        }
    }

    for event in events.try_iter() {
        report(&event);
    }
    Ok(())
}

fn show(store: &HierarchyStore) {
    let doc = store.state();
    let mut seen = BTreeSet::new();
    let root = PageId::from(ROOT_PAGE_ID);
    if doc.contains_page(&root) {
        print_subtree(&doc, &root, 0, &mut seen);
    }
    // Anything the root cannot reach still gets listed.
    for node in &doc.nodes {
        if !seen.contains(&node.id) {
            print_subtree(&doc, &node.id, 0, &mut seen);
        }
    }
}

fn print_subtree(doc: &HierarchyDocument, id: &PageId, depth: usize, seen: &mut BTreeSet<PageId>) {
    if !seen.insert(id.clone()) {
        return;
    }

    let label = doc
        .page(id)
        .map(|node| node.data.label.as_str())
        .unwrap_or("?");
    let indent = "  ".repeat(depth);
    let sections = doc.sections_map.get(id).map(Vec::as_slice).unwrap_or(&[]);
    if sections.is_empty() {
        println!("{indent}{id}  ({label})");
    } else {
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        println!("{indent}{id}  ({label})  [{}]", ids.join(", "));
    }

    for child in children_of(id, &doc.edges) {
        print_subtree(doc, child, depth + 1, seen);
    }
}

fn report(event: &StoreEvent) {
    match event {
        StoreEvent::DocumentReplaced { origin } => match origin {
            DocumentOrigin::Import => println!("imported"),
            DocumentOrigin::Reset => println!("reset to the starter site"),
            // Initial loads stay quiet; every run does one.
            DocumentOrigin::Storage | DocumentOrigin::Bootstrap => {
                tracing::debug!(?origin, "document installed")
            }
        },
        StoreEvent::DocumentSaved => println!("saved"),
        StoreEvent::PageAdded { id, label } => println!("added page {id} ({label})"),
        StoreEvent::PageDeleted { removed } => {
            let ids: Vec<&str> = removed.iter().map(PageId::as_str).collect();
            println!("deleted {} page(s): {}", removed.len(), ids.join(", "));
        }
        StoreEvent::EdgeConnected { source, target } => {
            println!("connected {source} -> {target}");
        }
        StoreEvent::SectionAdded { page, section_id } => {
            println!("added section {section_id} to {page}");
        }
        StoreEvent::SectionDeleted { page, section_id } => {
            println!("removed section {section_id} from {page}");
        }
        StoreEvent::SectionsReordered { page } => println!("reordered sections on {page}"),
    }
}
