//! # Kiosk Session
//!
//! A line-driven stand-in for the touch screen. One session mounts a catalog
//! view and a detail view on the API's shared filter store, so a filter changed
//! while reading an item is reflected in the list (and vice versa).

use super::render::{render_catalog, render_item, render_position};
use colored::Colorize;
use std::cell::{Cell, RefCell};
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;
use vitrine::api::KioskApi;
use vitrine::commands::filter::describe;
use vitrine::era::{self, Era};
use vitrine::error::Result;
use vitrine::filters::{Dimension, FilterStore, SubscriptionId};
use vitrine::model::ItemId;
use vitrine::store::CatalogSource;
use vitrine::views::catalog::CatalogView;
use vitrine::views::detail::{DetailLookup, DetailView};

const HELP: &str = "\
Commands:
  toggle <dimension> <value>     add or remove one value (sculptor, era, material)
  set <dimension> <v1, v2, ...>  replace a dimension (search takes free text)
  reset [dimension]              clear one dimension, or all of them
  search <text>                  set the search text (empty clears it)
  next | prev                    move through the list or the detail pages
  open [id]                      open the selected item, or the one given
  close                          back to the list
  text next|prev                 page through the item's texts
  photo next|prev                cycle through the item's photos
  filters                        show the active filters
  reload                         re-read the catalog
  quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "next" | "n" => Ok(Step::Next),
            "prev" | "previous" | "p" => Ok(Step::Previous),
            other => Err(format!("Expected next or prev, got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskCommand {
    Toggle(Dimension, String),
    Set(Dimension, String),
    Reset(Option<Dimension>),
    Search(String),
    Next,
    Previous,
    Open(Option<ItemId>),
    Close,
    Text(Step),
    Photo(Step),
    Filters,
    Reload,
    Help,
    Quit,
}

impl FromStr for KioskCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb.to_lowercase().as_str() {
            "toggle" => {
                let (dimension, value) = dimension_and_value(rest)?;
                if dimension == Dimension::Search {
                    return Err("search is free text; use: search <text>".to_string());
                }
                if value.is_empty() {
                    return Err(format!("Missing value: toggle {} <value>", dimension));
                }
                KioskCommand::Toggle(dimension, value)
            }
            "set" => {
                let (dimension, value) = dimension_and_value(rest)?;
                KioskCommand::Set(dimension, value)
            }
            "reset" if rest.is_empty() => KioskCommand::Reset(None),
            "reset" => KioskCommand::Reset(Some(rest.parse()?)),
            "search" => KioskCommand::Search(rest.to_string()),
            "next" | "n" => KioskCommand::Next,
            "prev" | "previous" | "p" => KioskCommand::Previous,
            "open" if rest.is_empty() => KioskCommand::Open(None),
            "open" => KioskCommand::Open(Some(rest.parse()?)),
            "close" | "back" => KioskCommand::Close,
            "text" => KioskCommand::Text(rest.parse()?),
            "photo" => KioskCommand::Photo(rest.parse()?),
            "filters" => KioskCommand::Filters,
            "reload" => KioskCommand::Reload,
            "help" | "?" => KioskCommand::Help,
            "quit" | "exit" | "q" => KioskCommand::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(command)
    }
}

fn dimension_and_value(rest: &str) -> std::result::Result<(Dimension, String), String> {
    let (dimension, value) = rest.split_once(' ').unwrap_or((rest, ""));
    if dimension.is_empty() {
        return Err("Missing dimension: sculptor, era, material or search".to_string());
    }
    Ok((dimension.parse()?, value.trim().to_string()))
}

fn split_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Catalog,
    Detail,
}

pub struct KioskSession<'a, S> {
    api: &'a KioskApi<S>,
    catalog: Rc<RefCell<CatalogView>>,
    detail: Rc<RefCell<DetailView>>,
    page: Page,
    filters_changed: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl<'a, S> KioskSession<'a, S>
where
    S: CatalogSource + Send + Sync + 'static,
{
    pub async fn start(api: &'a KioskApi<S>) -> Self {
        let catalog = api.mount_catalog().await;
        let detail = Rc::new(RefCell::new(DetailView::new(api.filters().clone())));
        api.refresh(&detail).await;

        let filters_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&filters_changed);
        let subscription = api.filters().subscribe(move |_| flag.set(true));

        Self {
            api,
            catalog,
            detail,
            page: Page::Catalog,
            filters_changed,
            subscription,
        }
    }

    fn store(&self) -> &FilterStore {
        self.api.filters()
    }

    /// Runs one command. Returns `false` when the session should end.
    pub async fn execute(&mut self, command: KioskCommand, out: &mut impl Write) -> Result<bool> {
        match command {
            KioskCommand::Toggle(dimension, value) => self.toggle(dimension, value, out)?,
            KioskCommand::Set(dimension, value) => self.set(dimension, &value, out)?,
            KioskCommand::Reset(Some(dimension)) => self.store().reset(dimension),
            KioskCommand::Reset(None) => self.store().reset_all(),
            KioskCommand::Search(text) => self.store().set_query(text),
            KioskCommand::Next => self.step(Step::Next, out)?,
            KioskCommand::Previous => self.step(Step::Previous, out)?,
            KioskCommand::Open(id) => self.open(id, out)?,
            KioskCommand::Close => {
                self.detail.borrow_mut().close();
                self.page = Page::Catalog;
            }
            KioskCommand::Text(step) => {
                if !self.on_detail(out)? {
                    return Ok(true);
                }
                let mut detail = self.detail.borrow_mut();
                let moved = match step {
                    Step::Next => detail.next_text(),
                    Step::Previous => detail.previous_text(),
                };
                if !moved {
                    writeln!(out, "{}", "No more text pages that way.".dimmed())?;
                }
            }
            KioskCommand::Photo(step) => {
                if !self.on_detail(out)? {
                    return Ok(true);
                }
                let mut detail = self.detail.borrow_mut();
                match step {
                    Step::Next => detail.next_photo(),
                    Step::Previous => detail.previous_photo(),
                }
            }
            KioskCommand::Filters => {
                self.write_filters(out)?;
                return Ok(true);
            }
            KioskCommand::Reload => {
                self.api.reload();
                self.api.refresh(&self.catalog).await;
                self.api.refresh(&self.detail).await;
                let total = self.catalog.borrow().dataset().len();
                writeln!(out, "{}", format!("Catalog reloaded: {} items.", total).green())?;
            }
            KioskCommand::Help => {
                write!(out, "{}", HELP)?;
                return Ok(true);
            }
            KioskCommand::Quit => return Ok(false),
        }

        if self.filters_changed.replace(false) {
            let mut catalog = self.catalog.borrow_mut();
            let total = catalog.dataset().len();
            let shown = catalog.filtered().len();
            writeln!(out, "{}", format!("{} of {} items match.", shown, total).dimmed())?;
        }
        self.render(out)?;
        Ok(true)
    }

    fn toggle(&self, dimension: Dimension, value: String, out: &mut impl Write) -> Result<()> {
        match dimension {
            Dimension::Sculptor => self.store().toggle_sculptor(value),
            Dimension::Material => self.store().toggle_material(value),
            Dimension::Era => match value.parse::<Era>() {
                Ok(era) => self.store().toggle_era(era),
                Err(e) => writeln!(out, "{}", e.red())?,
            },
            Dimension::Search => self.store().set_query(value),
        }
        Ok(())
    }

    fn set(&self, dimension: Dimension, value: &str, out: &mut impl Write) -> Result<()> {
        match dimension {
            Dimension::Sculptor => self.store().set_sculptors(split_values(value)),
            Dimension::Material => self.store().set_materials(split_values(value)),
            Dimension::Era => {
                let eras: std::result::Result<Vec<Era>, String> =
                    split_values(value).iter().map(|v| v.parse()).collect();
                match eras {
                    Ok(eras) => self.store().set_eras(eras),
                    Err(e) => writeln!(out, "{}", e.red())?,
                }
            }
            Dimension::Search => self.store().set_query(value),
        }
        Ok(())
    }

    fn step(&mut self, step: Step, out: &mut impl Write) -> Result<()> {
        match self.page {
            Page::Catalog => {
                let mut catalog = self.catalog.borrow_mut();
                let moved = match step {
                    Step::Next => catalog.next_item(),
                    Step::Previous => catalog.previous_item(),
                };
                if !moved {
                    writeln!(out, "{}", "No item that way.".dimmed())?;
                }
            }
            Page::Detail => {
                let mut visited = None;
                let target = {
                    let mut sink = |id: ItemId| visited = Some(id);
                    let mut detail = self.detail.borrow_mut();
                    match step {
                        Step::Next => detail.next(&mut sink),
                        Step::Previous => detail.previous(&mut sink),
                    }
                };
                if target.is_none() {
                    writeln!(out, "{}", "No item that way in the current selection.".dimmed())?;
                }
                tracing::debug!(?visited, "detail navigation");
            }
        }
        Ok(())
    }

    fn open(&mut self, id: Option<ItemId>, out: &mut impl Write) -> Result<()> {
        let mut opened = None;
        let listed = {
            let mut sink = |id: ItemId| opened = Some(id);
            let mut catalog = self.catalog.borrow_mut();
            match id {
                Some(id) => catalog.open(id, &mut sink),
                None => catalog.open_current(&mut sink).is_some(),
            }
        };

        // An item outside the current list can still be looked at directly.
        let target = match (opened, id) {
            (Some(target), _) => target,
            (None, Some(id)) => {
                writeln!(out, "{}", format!("Item {} is not in the current list.", id).dimmed())?;
                id
            }
            (None, None) => {
                writeln!(out, "{}", "Nothing to open.".dimmed())?;
                return Ok(());
            }
        };
        tracing::debug!(%target, listed, "opening item");
        self.detail.borrow_mut().open(target);
        self.page = Page::Detail;
        Ok(())
    }

    fn on_detail(&self, out: &mut impl Write) -> Result<bool> {
        if self.page != Page::Detail {
            writeln!(out, "{}", "Open an item first.".dimmed())?;
            return Ok(false);
        }
        Ok(true)
    }

    fn write_filters(&self, out: &mut impl Write) -> Result<()> {
        let lines = self.store().read(describe);
        if lines.is_empty() {
            writeln!(out, "No filters active.")?;
        }
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    pub fn render(&self, out: &mut impl Write) -> Result<()> {
        match self.page {
            Page::Catalog => {
                let mut catalog = self.catalog.borrow_mut();
                let cursor = catalog.cursor();
                write!(out, "{}", render_catalog(catalog.filtered(), cursor))?;
            }
            Page::Detail => self.render_detail(out)?,
        }
        Ok(())
    }

    fn render_detail(&self, out: &mut impl Write) -> Result<()> {
        let mut detail = self.detail.borrow_mut();
        match detail.item() {
            DetailLookup::Closed => return Ok(()),
            DetailLookup::Loading => {
                writeln!(out, "Loading…")?;
                return Ok(());
            }
            DetailLookup::NotFound(id) => {
                writeln!(out, "{}", format!("Item {} not found.", id).red())?;
                return Ok(());
            }
            DetailLookup::Found(item) => {
                let eras = era::classify(item.creation_time.as_deref());
                write!(out, "{}", render_item(item, &eras))?;
            }
        }

        if let Some((page, counter)) = detail.text_page() {
            writeln!(out, "\n{}\n{}", page, format!("text {}", counter).dimmed())?;
        }
        if let Some((photo, counter)) = detail.photo() {
            writeln!(out, "{} {}", photo, format!("photo {}", counter).dimmed())?;
        }

        let position = detail.position();
        let shown = detail.shown();
        write!(out, "{}", render_position(position, shown))?;
        let adjacent = detail.adjacent();
        writeln!(
            out,
            "previous: {}  next: {}",
            adjacent.previous.map(|i| i.label()).unwrap_or("—"),
            adjacent.next.map(|i| i.label()).unwrap_or("—"),
        )?;
        Ok(())
    }
}

impl<S> Drop for KioskSession<'_, S> {
    fn drop(&mut self) {
        self.api.filters().unsubscribe(self.subscription);
    }
}

/// Reads commands from `input` until it ends or the visitor quits.
pub async fn run_session<S, R, W>(api: &KioskApi<S>, input: R, out: &mut W) -> Result<()>
where
    S: CatalogSource + Send + Sync + 'static,
    R: BufRead,
    W: Write,
{
    let mut session = KioskSession::start(api).await;
    session.render(out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<KioskCommand>() {
            Ok(command) => {
                if !session.execute(command, out).await? {
                    break;
                }
            }
            Err(e) => writeln!(out, "{}", e.red())?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine::config::VitrineConfig;
    use vitrine::model::CatalogItem;
    use vitrine::store::memory::InMemorySource;

    fn api() -> KioskApi<InMemorySource> {
        let items = vec![
            CatalogItem::new(1)
                .with_name("Bust of Lomonosov")
                .with_sculptor("Shubin")
                .with_creation_time("1789")
                .with_material("Marble")
                .with_texts(["Carved from marble.", "Acquired in 1921."]),
            CatalogItem::new(2)
                .with_name("Minin and Pozharsky")
                .with_sculptor("Martos")
                .with_creation_time("cast in 1818")
                .with_material("Bronze"),
            CatalogItem::new(3).with_name("Richelieu").with_sculptor("Martos"),
        ];
        KioskApi::new(
            InMemorySource::new(items),
            &VitrineConfig::default(),
            "/nonexistent",
        )
    }

    async fn session_output(script: &str) -> String {
        let api = api();
        let mut out = Vec::new();
        run_session(&api, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "toggle sculptor Martos".parse(),
            Ok(KioskCommand::Toggle(Dimension::Sculptor, "Martos".into()))
        );
        assert_eq!(
            "set era XIX, classicism".parse(),
            Ok(KioskCommand::Set(Dimension::Era, "XIX, classicism".into()))
        );
        assert_eq!("reset".parse(), Ok(KioskCommand::Reset(None)));
        assert_eq!(
            "reset material".parse(),
            Ok(KioskCommand::Reset(Some(Dimension::Material)))
        );
        assert_eq!("open 2".parse(), Ok(KioskCommand::Open(Some(ItemId(2)))));
        assert_eq!("text prev".parse(), Ok(KioskCommand::Text(Step::Previous)));
        assert_eq!("search".parse(), Ok(KioskCommand::Search(String::new())));
    }

    #[test]
    fn test_parse_errors() {
        assert!("toggle search x".parse::<KioskCommand>().is_err());
        assert!("toggle era".parse::<KioskCommand>().is_err());
        assert!("open two".parse::<KioskCommand>().is_err());
        assert!("dance".parse::<KioskCommand>().is_err());
    }

    #[tokio::test]
    async fn test_filters_narrow_the_list() {
        let output = session_output("toggle sculptor Martos\nfilters\nquit\n").await;
        assert!(output.contains("2 of 3 items match."));
        assert!(output.contains("sculptor: Martos"));
    }

    #[tokio::test]
    async fn test_detail_follows_filters() {
        let output = session_output(
            "open 3\ntoggle material Bronze\nprev\nreset material\nprev\nquit\n",
        )
        .await;
        assert!(output.contains("Richelieu"));
        assert!(output.contains("not in current selection"));
        assert!(output.contains("No item that way in the current selection."));
        assert!(output.contains("3 of 3 in current selection"));
        assert!(output.contains("2 of 3 in current selection"));
    }

    #[tokio::test]
    async fn test_text_pages() {
        let output = session_output("open\ntext next\ntext next\nclose\ntext next\n").await;
        assert!(output.contains("text 1 / 2"));
        assert!(output.contains("text 2 / 2"));
        assert!(output.contains("No more text pages that way."));
        assert!(output.contains("Open an item first."));
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_session_alive() {
        let output = session_output("dance\nsearch minin\nquit\n").await;
        assert!(output.contains("Unknown command: dance"));
        assert!(output.contains("1 of 3 items match."));
    }

    #[tokio::test]
    async fn test_session_releases_subscription() {
        let api = api();
        let session = KioskSession::start(&api).await;
        let subscription = session.subscription;
        drop(session);
        assert!(!api.filters().unsubscribe(subscription));
    }
}
