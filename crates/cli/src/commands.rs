// FILE: crates/cli/src/commands.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use console::style;
use shelfmate_config::{Config, ConfigManager, ListConfig};
use shelfmate_core::{Book, BookId, BookState};
use shelfmate_library::{
    enqueue_last, move_in_queue, pending_queue, BookListView, FilterParams, ReadingStats,
    SortKey, SortParams,
};
use shelfmate_sync_engine::{load_books, save_books, JsonFileStore, SyncConfig, SyncEngine};
use std::path::{Path, PathBuf};

/// List books through the filter-sort pipeline
pub fn list_books(matches: &ArgMatches, config: &Config, data_dir: &Path) -> Result<()> {
    let path = collection_path(matches, "books", data_dir)?;
    let books = load_collection(&path)?;

    let view = BookListView::new(
        filters_from_matches(matches)?,
        sort_from_matches(matches, &config.list)?,
    );
    let shown = view.render(&books);

    if shown.is_empty() {
        println!("No books match the current filters.");
        return Ok(());
    }

    println!(
        "\n{} of {} books",
        style(shown.len()).bold().cyan(),
        books.len()
    );
    println!("{}", "=".repeat(80));

    for book in &shown {
        print_book_summary(book, view.is_pending_list());
    }

    Ok(())
}

/// Show reading statistics for finished books
pub fn show_stats(matches: &ArgMatches, config: &Config, data_dir: &Path) -> Result<()> {
    let path = collection_path(matches, "books", data_dir)?;
    let books = load_collection(&path)?;
    let stats = ReadingStats::from_books_with_formats(&books, &config.list.formats);

    if !stats.has_history() {
        println!("No finished books yet. Mark a book as read to start tracking.");
        return Ok(());
    }

    println!("\n{}", style("Reading Statistics").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Books Read: {}", style(stats.total_read).bold());
    println!("Pages Read: {}", style(stats.total_pages).bold());
    println!("Average Length: {:.0} pages", stats.average_pages());
    match stats.average_rating() {
        Some(avg) => println!("Average Rating: {:.1}/10 ({} rated)", avg, stats.rated_count),
        None => println!("Average Rating: -"),
    }
    if let Some((year, count)) = stats.busiest_year() {
        println!("Busiest Year: {} ({} books)", year, count);
    }

    if !stats.by_year.is_empty() {
        println!("\nBy Year:");
        for (year, count) in &stats.by_year {
            println!("  {:<12} {}", year, count);
        }
    }

    if !stats.by_month.is_empty() {
        println!("\nBy Month:");
        for (&month, count) in &stats.by_month {
            println!("  {:<12} {}", month_name(month), count);
        }
    }

    println!("\nBy Format:");
    for (format, count) in &stats.by_format {
        println!("  {:<12} {}", format, count);
    }
    if stats.untagged > 0 {
        println!("  {:<12} {}", "(no format)", stats.untagged);
    }

    let authors = stats.top_authors(5);
    if !authors.is_empty() {
        println!("\nTop Authors:");
        for (name, count) in authors {
            println!("  {:<30} {}", truncate(name, 30), count);
        }
    }

    if let Some(book) = &stats.shortest {
        println!("\nShortest: {}", describe_length(book));
    }
    if let Some(book) = &stats.longest {
        println!("Longest:  {}", describe_length(book));
    }

    Ok(())
}

/// Show the pending queue, optionally adding or moving a book first
pub fn manage_queue(matches: &ArgMatches, data_dir: &Path) -> Result<()> {
    let path = collection_path(matches, "books", data_dir)?;
    let path = path.as_path();
    let mut books = load_collection(path)?;

    if let Some(id) = matches.get_one::<String>("add") {
        let id = BookId::from(id.as_str());
        let position = enqueue_last(&mut books, &id)
            .with_context(|| format!("Failed to queue {} from {}", id, path.display()))?;
        save_collection(path, &books)?;
        println!(
            "{} Queued {} at position {}",
            style("✓").green().bold(),
            id,
            position
        );
    }

    if let Some(id) = matches.get_one::<String>("move") {
        let position = matches
            .get_one::<usize>("to")
            .copied()
            .ok_or_else(|| anyhow!("--to is required with --move"))?;
        let id = BookId::from(id.as_str());
        move_in_queue(&mut books, &id, position)
            .with_context(|| format!("Failed to move {}", id))?;
        save_collection(path, &books)?;
        println!(
            "{} Moved {} to position {}",
            style("✓").green().bold(),
            id,
            position
        );
    }

    let queue = pending_queue(&books);
    if queue.is_empty() {
        println!("The pending queue is empty.");
        return Ok(());
    }

    println!("\n{} Pending", style(queue.len()).bold().cyan());
    println!("{}", "=".repeat(80));
    for (position, book) in queue.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            position,
            style(display_title(book)).bold(),
            style(truncate(book.id.as_str(), 12)).dim()
        );
    }

    Ok(())
}

/// Push the local collection onto the remote snapshot
pub fn sync_books(matches: &ArgMatches, config: &Config, data_dir: &Path) -> Result<()> {
    let local_path = collection_path(matches, "local", data_dir)?;
    let remote_path = collection_path(matches, "remote", data_dir)?;
    let remote_path = remote_path.as_path();

    let local = load_collection(&local_path)?;
    let dry_run = matches.get_flag("dry-run") || config.sync.dry_run;

    if let Some(parent) = remote_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !dry_run && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut remote = JsonFileStore::open(remote_path)
        .with_context(|| format!("Failed to open remote {}", remote_path.display()))?;
    let engine = SyncEngine::new(SyncConfig { dry_run });
    let report = engine.sync(&local, &mut remote).context("Sync failed")?;

    if report.is_noop() {
        println!("{} Remote already up to date", style("✓").green().bold());
        return Ok(());
    }

    let (add_label, remove_label) = if report.dry_run {
        ("Would push", "Would remove")
    } else {
        ("Pushed", "Removed")
    };

    for id in &report.pushed {
        println!("  {} {}", style("+").green(), id);
    }
    for id in &report.removed {
        println!("  {} {}", style("-").red(), id);
    }
    println!(
        "\n{}: {}  {}: {}",
        add_label,
        style(report.pushed.len()).bold(),
        remove_label,
        style(report.removed.len()).bold()
    );

    if report.dry_run {
        println!("{}", style("Dry run: remote left unchanged").yellow());
    } else {
        println!(
            "{} Synced to {}",
            style("✓").green().bold(),
            remote_path.display()
        );
    }

    Ok(())
}

/// Config file subcommands
pub fn manage_config(manager: &ConfigManager, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            if manager.initialize().context("Failed to write config")? {
                println!(
                    "{} Config created at {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!(
                    "Config already exists at {}",
                    manager.config_path().display()
                );
            }
        }
        Some(("show", _)) => {
            let config = manager
                .load_with_env_overrides()
                .context("Failed to load config")?;
            let toml = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("# {}", manager.config_path().display());
            println!("{}", toml);
        }
        Some(("validate", _)) => {
            let problems = manager.validate().context("Failed to load config")?;
            if problems.is_empty() {
                println!("{} Config is valid", style("✓").green().bold());
            } else {
                for problem in &problems {
                    println!("  {} {}", style("✗").red(), problem);
                }
                bail!("{} problem(s) in {}", problems.len(), manager.config_path().display());
            }
        }
        Some(("path", _)) => {
            println!("{}", manager.config_path().display());
        }
        Some(("reset", sub_matches)) => {
            if !sub_matches.get_flag("force") {
                println!("Reset {} to defaults? (y/N)", manager.config_path().display());
                let mut input = String::new();
                std::io::stdin()
                    .read_line(&mut input)
                    .context("Failed to read input")?;

                if !input.trim().eq_ignore_ascii_case("y") {
                    println!("Reset cancelled.");
                    return Ok(());
                }
            }
            manager.reset().context("Failed to reset config")?;
            println!("{} Config reset to defaults", style("✓").green().bold());
        }
        _ => bail!("Missing config subcommand; try 'shelfmate config --help'"),
    }

    Ok(())
}

/// Reads a collection argument; relative paths missing from the working
/// directory are looked up in the configured data directory
fn collection_path(matches: &ArgMatches, name: &str, data_dir: &Path) -> Result<PathBuf> {
    let path = matches
        .get_one::<PathBuf>(name)
        .ok_or_else(|| anyhow!("Argument <{}> is required", name))?;
    Ok(resolve_in_data_dir(path, data_dir))
}

fn resolve_in_data_dir(path: &Path, data_dir: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let resolved = data_dir.join(path);
    log::debug!("{} not in working directory, using {}", path.display(), resolved.display());
    resolved
}

/// Reads a collection file, warning about records that fail validation
fn load_collection(path: &Path) -> Result<Vec<Book>> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let books = load_books(path)
        .with_context(|| format!("Failed to read books from {}", path.display()))?;

    for book in &books {
        if let Err(e) = book.ensure_valid() {
            log::warn!("{}", e);
        }
    }
    log::debug!("Loaded {} books from {}", books.len(), path.display());

    Ok(books)
}

fn save_collection(path: &Path, books: &[Book]) -> Result<()> {
    save_books(path, books).with_context(|| format!("Failed to write {}", path.display()))
}

fn filters_from_matches(matches: &ArgMatches) -> Result<FilterParams> {
    let mut filters = FilterParams::new();

    if let Some(query) = matches.get_one::<String>("query") {
        filters = filters.with_query(query.as_str());
    }
    if let Some(state) = matches.get_one::<String>("state") {
        let state: BookState = state
            .parse()
            .with_context(|| format!("Invalid --state '{}'", state))?;
        filters = filters.with_state(state);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        filters = filters.with_format(format.as_str());
    }
    if let Some(author) = matches.get_one::<String>("author") {
        filters = filters.with_author(author.as_str());
    }
    if let Some(&year) = matches.get_one::<i32>("year") {
        filters = filters.with_year(year);
    }
    if let Some(&month) = matches.get_one::<u32>("month") {
        filters = filters.with_month(month);
    }

    Ok(filters)
}

fn sort_from_matches(matches: &ArgMatches, defaults: &ListConfig) -> Result<SortParams> {
    let mut sort = defaults.sort_params();

    if let Some(name) = matches.get_one::<String>("sort") {
        sort.key = name
            .parse::<SortKey>()
            .with_context(|| format!("Invalid --sort '{}'", name))?;
    }
    if matches.get_flag("desc") {
        sort.descending = true;
    }

    Ok(sort)
}

fn print_book_summary(book: &Book, pending_list: bool) {
    println!("\n{}", style(display_title(book)).bold());
    if !book.authors.is_empty() {
        println!("  by {}", book.authors_joined());
    }

    let mut details = vec![
        format!("ID: {}", truncate(book.id.as_str(), 12)),
        format!("State: {}", book.state),
    ];
    if pending_list {
        details.push(format!("Priority: {}", book.priority));
    }
    if let Some(format) = &book.format {
        details.push(format.clone());
    }
    if let Some(pages) = book.page_count {
        details.push(format!("{} pages", pages));
    }
    if let Some(rating) = book.rating {
        details.push(format_rating(rating));
    }
    if let Some(date) = book.read_date {
        details.push(format!("Read {}", date));
    }
    println!("  {}", details.join(" | "));
}

fn display_title(book: &Book) -> &str {
    match book.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title,
        _ => "(untitled)",
    }
}

fn describe_length(book: &Book) -> String {
    match book.page_count {
        Some(pages) => format!("{} ({} pages)", display_title(book), pages),
        None => display_title(book).to_string(),
    }
}

fn format_rating(rating: f32) -> String {
    format!("{:.1}/10", rating)
}

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn matches_for(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["shelfmate"];
        argv.extend_from_slice(args);
        crate::build_cli()
            .try_get_matches_from(argv)
            .expect("arguments should parse")
    }

    fn sub<'a>(matches: &'a ArgMatches, name: &str) -> &'a ArgMatches {
        matches.subcommand_matches(name).expect("subcommand present")
    }

    fn write_books(dir: &TempDir, name: &str, books: &[Book]) -> PathBuf {
        let path = dir.path().join(name);
        save_books(&path, books).expect("should write books");
        path
    }

    fn titled(id: &str, title: &str) -> Book {
        let mut book = Book::new(id);
        book.title = Some(title.to_string());
        book
    }

    #[test]
    fn test_filters_from_arguments() {
        let matches = matches_for(&[
            "list", "books.json", "--state", "read", "--author", "Le Guin", "--year", "2021",
            "--month", "3",
        ]);
        let filters = filters_from_matches(sub(&matches, "list")).unwrap();

        assert_eq!(filters.state, Some(BookState::Read));
        assert_eq!(filters.author.as_deref(), Some("Le Guin"));
        assert_eq!(filters.year, Some(2021));
        assert_eq!(filters.month, Some(3));
        assert!(filters.query.is_empty());
    }

    #[test]
    fn test_invalid_state_is_reported() {
        let matches = matches_for(&["list", "books.json", "--state", "shelved"]);
        assert!(filters_from_matches(sub(&matches, "list")).is_err());
    }

    #[test]
    fn test_month_out_of_range_is_rejected_by_parser() {
        let result =
            crate::build_cli().try_get_matches_from(["shelfmate", "list", "b.json", "--month", "13"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_defaults_come_from_config() {
        let defaults = ListConfig {
            default_sort_key: "rating".to_string(),
            default_descending: true,
            ..Default::default()
        };
        let matches = matches_for(&["list", "books.json"]);
        let sort = sort_from_matches(sub(&matches, "list"), &defaults).unwrap();
        assert_eq!(sort, SortParams::descending(SortKey::Rating));
    }

    #[test]
    fn test_sort_arguments_override_config() {
        let matches = matches_for(&["list", "books.json", "--sort", "author", "--desc"]);
        let sort = sort_from_matches(sub(&matches, "list"), &ListConfig::default()).unwrap();
        assert_eq!(sort, SortParams::descending(SortKey::Author));

        let matches = matches_for(&["list", "books.json", "--sort", "colour"]);
        assert!(sort_from_matches(sub(&matches, "list"), &ListConfig::default()).is_err());
    }

    #[test]
    fn test_list_and_stats_run_on_a_collection() {
        let dir = TempDir::new().unwrap();
        let mut read = titled("1", "Dune");
        read.page_count = Some(412);
        read.mark_read(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap());
        let path = write_books(&dir, "books.json", &[read, titled("2", "Emma")]);
        let path = path.to_str().unwrap();

        let config = Config::default();
        let matches = matches_for(&["list", path, "--query", "dune"]);
        list_books(sub(&matches, "list"), &config, dir.path()).unwrap();

        let matches = matches_for(&["stats", path]);
        show_stats(sub(&matches, "stats"), &config, dir.path()).unwrap();
    }

    #[test]
    fn test_missing_collection_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        assert!(load_collection(&path).is_err());
    }

    #[test]
    fn test_sync_rewrites_remote() {
        let dir = TempDir::new().unwrap();
        let local = write_books(&dir, "local.json", &[Book::new("a"), Book::new("b")]);
        let remote = write_books(&dir, "remote.json", &[Book::new("b"), Book::new("c")]);

        let matches = matches_for(&["sync", local.to_str().unwrap(), remote.to_str().unwrap()]);
        sync_books(sub(&matches, "sync"), &Config::default(), dir.path()).unwrap();

        let mut ids: Vec<String> = load_books(&remote)
            .unwrap()
            .into_iter()
            .map(|b| b.id.to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_sync_dry_run_from_config() {
        let dir = TempDir::new().unwrap();
        let local = write_books(&dir, "local.json", &[Book::new("a")]);
        let remote = write_books(&dir, "remote.json", &[Book::new("z")]);

        let mut config = Config::default();
        config.sync.dry_run = true;
        let matches = matches_for(&["sync", local.to_str().unwrap(), remote.to_str().unwrap()]);
        sync_books(sub(&matches, "sync"), &config, dir.path()).unwrap();

        let ids: Vec<String> = load_books(&remote)
            .unwrap()
            .into_iter()
            .map(|b| b.id.to_string())
            .collect();
        assert_eq!(ids, vec!["z"]);
    }

    #[test]
    fn test_queue_add_and_move() {
        let dir = TempDir::new().unwrap();
        let mut first = Book::new("first");
        first.enqueue(0);
        let path = write_books(&dir, "books.json", &[first, Book::new("second")]);
        let path_str = path.to_str().unwrap();

        let matches = matches_for(&["queue", path_str, "--add", "second"]);
        manage_queue(sub(&matches, "queue"), dir.path()).unwrap();

        let matches = matches_for(&["queue", path_str, "--move", "second", "--to", "0"]);
        manage_queue(sub(&matches, "queue"), dir.path()).unwrap();

        let books = load_books(&path).unwrap();
        let order: Vec<&str> = pending_queue(&books).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[test]
    fn test_queue_add_after_max_priority() {
        let dir = TempDir::new().unwrap();
        let mut top = Book::new("top");
        top.enqueue(i32::MAX);
        let path = write_books(&dir, "books.json", &[top, Book::new("late")]);

        let matches = matches_for(&["queue", path.to_str().unwrap(), "--add", "late"]);
        manage_queue(sub(&matches, "queue"), dir.path()).unwrap();

        let books = load_books(&path).unwrap();
        let queue = pending_queue(&books);
        let order: Vec<(&str, i32)> = queue.iter().map(|b| (b.id.as_str(), b.priority)).collect();
        assert_eq!(order, vec![("top", 0), ("late", 1)]);
    }

    #[test]
    fn test_queue_add_unknown_book_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = write_books(&dir, "books.json", &[Book::new("a")]);

        let matches = matches_for(&["queue", path.to_str().unwrap(), "--add", "ghost"]);
        assert!(manage_queue(sub(&matches, "queue"), dir.path()).is_err());
        assert!(pending_queue(&load_books(&path).unwrap()).is_empty());
    }

    #[test]
    fn test_relative_collection_resolves_in_data_dir() {
        let dir = TempDir::new().unwrap();
        write_books(&dir, "shelfmate-data-dir-books.json", &[titled("1", "Emma")]);

        let relative = Path::new("shelfmate-data-dir-books.json");
        assert!(!relative.exists());
        assert_eq!(
            resolve_in_data_dir(relative, dir.path()),
            dir.path().join(relative)
        );

        let matches = matches_for(&["list", "shelfmate-data-dir-books.json"]);
        list_books(sub(&matches, "list"), &Config::default(), dir.path()).unwrap();
    }

    #[test]
    fn test_absolute_collection_ignores_data_dir() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let path = write_books(&dir, "books.json", &[]);
        assert_eq!(resolve_in_data_dir(&path, other.path()), path);
    }

    #[test]
    fn test_sync_creates_remote_in_data_dir() {
        let dir = TempDir::new().unwrap();
        let local = write_books(&dir, "local.json", &[Book::new("a")]);
        let data_dir = dir.path().join("data");

        let matches = matches_for(&[
            "sync",
            local.to_str().unwrap(),
            "shelfmate-data-dir-remote.json",
        ]);
        sync_books(sub(&matches, "sync"), &Config::default(), &data_dir).unwrap();

        let remote = load_books(&data_dir.join("shelfmate-data-dir-remote.json")).unwrap();
        assert_eq!(remote.len(), 1);
    }

    #[test]
    fn test_queue_move_requires_position() {
        let result = crate::build_cli()
            .try_get_matches_from(["shelfmate", "queue", "b.json", "--move", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init_and_validate() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path().to_path_buf()).unwrap();

        let matches = matches_for(&["config", "init"]);
        manage_config(&manager, sub(&matches, "config")).unwrap();
        assert!(manager.config_path().exists());

        let matches = matches_for(&["config", "validate"]);
        manage_config(&manager, sub(&matches, "config")).unwrap();

        std::fs::write(manager.config_path(), "[list]\ndefault_sort_key = \"mood\"\n").unwrap();
        assert!(manage_config(&manager, sub(&matches, "config")).is_err());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(truncate("abcdefgh", 8), "abcdefgh");
        assert_eq!(truncate("abcdefghi", 8), "abcdefgh...");
        assert_eq!(truncate("äöüäöüäöü", 3), "äöü...");
        assert_eq!(format_rating(8.5), "8.5/10");
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(display_title(&Book::new("x")), "(untitled)");
    }
}
