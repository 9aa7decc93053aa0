//! `pixshelf browse` - line-driven image viewer

use anyhow::Result;
use app_core::{
    AppConfig, AppError, FileSettingsStore, FocusDomain, ImagePosition, KeyEffect, PinOutcome, SortBy,
    Viewer,
};
use app_fs::{ConfirmPrompt, DefaultFileOperations, DeleteOutcome, ImageEntry};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

const HELP: &str = "\
commands:
  open <dir>             scan a directory
  ls                     list images (* focused, P pinned)
  view <n>               open image n full size
  pinned                 list pinned images
  pview <n>              open pinned image n
  next | prev | close    navigate the open image
  pin <n> | unpin <n>    toggle a pin / remove pinned image n
  delete [n]             delete image n (default: the open one)
  sort name|modified     sort key
  reverse                flip sort direction
  size <px>              thumbnail size (100-500)
  position top|center|bottom
  key <chord>            press a key, e.g. ArrowRight, Escape, Meta+t
  quit";

/// Asks on the terminal
struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, title: &str, message: &str, detail: &str) -> bool {
        print!("{}\n{}\n{}\n[y/N] ", title, message, detail);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

pub async fn run(config: &AppConfig, dir: Option<PathBuf>) -> Result<()> {
    let settings = Arc::new(FileSettingsStore::open_default()?);
    let ops = Arc::new(DefaultFileOperations::new().with_trash(config.filer.use_recycle_bin));
    let mut viewer = Viewer::new(config, ops, settings);

    let restored = viewer.restore();
    let start = dir.or(restored.filter(|_| config.general.restore_last_directory));
    if let Some(start) = start {
        open(&mut viewer, start).await;
    } else {
        println!("No directory open. Type `open <dir>` or `help`.");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match cmd {
            "" => {}
            "quit" | "exit" | "q" => break,
            "help" | "?" => println!("{}", HELP),
            "open" if !arg.is_empty() => open(&mut viewer, PathBuf::from(arg)).await,
            "ls" => list(&viewer),
            "pinned" => list_pinned(&viewer),
            "view" => match nth(&viewer.sorted(), arg) {
                Some(path) => {
                    viewer.focus_grid(&path);
                    show_focus(&viewer);
                }
                None => println!("No such image"),
            },
            "pview" => match nth(viewer.collection().pinned().entries(), arg) {
                Some(path) => {
                    viewer.focus_pinned(&path);
                    show_focus(&viewer);
                }
                None => println!("No such pinned image"),
            },
            "next" => {
                viewer.next();
                show_focus(&viewer);
            }
            "prev" => {
                viewer.prev();
                show_focus(&viewer);
            }
            "close" => viewer.close_focus(),
            "pin" => match nth(&viewer.sorted(), arg) {
                Some(path) => match viewer.toggle_pin(&path) {
                    Some(PinOutcome::Pinned) => println!("Pinned"),
                    Some(PinOutcome::Unpinned) => println!("Unpinned"),
                    Some(PinOutcome::Full) => println!("Only 3 images can be pinned"),
                    None => {}
                },
                None => println!("No such image"),
            },
            "unpin" => match nth(viewer.collection().pinned().entries(), arg) {
                Some(path) => {
                    viewer.unpin(&path);
                }
                None => println!("No such pinned image"),
            },
            "delete" => {
                let target = if arg.is_empty() {
                    viewer.collection().focused().map(|e| e.path.clone())
                } else {
                    nth(&viewer.sorted(), arg)
                };
                match target {
                    Some(path) => {
                        let outcome = viewer.delete(&path, &StdinPrompt);
                        match (&outcome, AppError::from_delete(&outcome)) {
                            (_, Some(err)) => println!("{}", err.user_message()),
                            (DeleteOutcome::Deleted { path }, None) => {
                                println!("Deleted {}", path.display())
                            }
                            _ => println!("Canceled"),
                        }
                    }
                    None => println!("Nothing to delete"),
                }
            }
            "sort" => match arg {
                "name" => viewer.set_sort_by(SortBy::Name),
                "modified" | "date" => viewer.set_sort_by(SortBy::LastModified),
                _ => println!("sort name|modified"),
            },
            "reverse" => viewer.toggle_direction(),
            "size" => match arg.parse::<u32>() {
                Ok(px) => println!("Thumbnail size {}px", viewer.set_thumbnail_size(px)),
                Err(_) => println!("size <px>"),
            },
            "position" => match arg.parse::<ImagePosition>() {
                Ok(position) => viewer.set_image_position(position),
                Err(e) => println!("{}", e),
            },
            "key" => match viewer.handle_key(arg) {
                KeyEffect::Navigated => show_focus(&viewer),
                KeyEffect::Closed => println!("Closed"),
                KeyEffect::Position(position) => println!("Image position: {}", position),
                KeyEffect::Ignored => {}
            },
            _ => println!("Unknown command. Type `help`."),
        }
    }

    Ok(())
}

async fn open(viewer: &mut Viewer, dir: PathBuf) {
    if !app_fs::directory_exists(&dir) {
        println!("Not a directory: {}", dir.display());
        return;
    }

    let images = app_fs::scan_images_async(dir.clone()).await;
    let count = viewer.apply_scan(dir.clone(), images);
    println!("{}: {} images", dir.display(), count);
}

/// Path of the 1-based item `arg` in `entries`
fn nth(entries: &[ImageEntry], arg: &str) -> Option<String> {
    let n: usize = arg.parse().ok()?;
    entries.get(n.checked_sub(1)?).map(|e| e.path.clone())
}

fn list(viewer: &Viewer) {
    let collection = viewer.collection();
    let focused = collection.focus().map(|f| f.path.as_str());
    let prefs = viewer.prefs();

    println!(
        "sort: {:?} {:?} | thumbnails {}px, {}",
        collection.sort().by,
        collection.sort().direction,
        prefs.thumbnail_size,
        prefs.image_position
    );
    for (i, entry) in viewer.sorted().iter().enumerate() {
        let focus_mark = if focused == Some(entry.path.as_str()) { '*' } else { ' ' };
        let pin_mark = if collection.is_pinned(&entry.path) { 'P' } else { ' ' };
        println!(
            "{:>4} {}{} {}  {}",
            i + 1,
            focus_mark,
            pin_mark,
            entry.last_modified_date.format("%Y-%m-%d %H:%M"),
            entry.name
        );
    }
}

fn list_pinned(viewer: &Viewer) {
    let pinned = viewer.collection().pinned();
    if pinned.is_empty() {
        println!("Nothing pinned");
    }
    for (i, entry) in pinned.entries().iter().enumerate() {
        println!("{:>4}  {}", i + 1, entry.name);
    }
}

fn show_focus(viewer: &Viewer) {
    let collection = viewer.collection();
    match (collection.focus(), collection.focused()) {
        (Some(focus), Some(entry)) => {
            let domain = match focus.domain {
                FocusDomain::Grid => "grid",
                FocusDomain::Pinned => "pinned",
            };
            println!("[{}] {}", domain, entry.fs_path().display());
        }
        _ => println!("No image open"),
    }
}
