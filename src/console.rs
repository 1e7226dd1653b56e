//! Line-oriented terminal menus
//!
//! The console reads one answer per line from any `BufRead` and writes
//! menus and tables to any `Write`, so a whole session can be scripted.
//! End of input ends the session.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::error::{AppError, Result};
use crate::models::{Category, Comment, User};
use crate::services::{self, admin, auth, comments, validation::parse_number, SortKey, SortOrder};
use crate::store::Sparse;
use crate::AppState;

pub struct Console<R, W> {
    input: R,
    out: W,
    state: AppState,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Self { input, out, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main menu until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::info!("Input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.choose("MAIN MENU", &["Login", "Register", "Admin", "Exit"])?;
            let result = match choice {
                1 => self.login(),
                2 => self.register(),
                3 => self.admin(),
                _ => return Ok(()),
            };
            self.report(result)?;
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    fn login(&mut self) -> Result<()> {
        let username = self.ask("Username")?;
        let password = self.ask("Password")?;
        let user = auth::login(&self.state, &username, &password)?;

        self.success(&format!("Login successful! Welcome, {}!", user.username))?;
        self.user_menu(user)
    }

    fn register(&mut self) -> Result<()> {
        let username = self.ask("Username")?;
        let password = self.ask("Password")?;
        let confirm = self.ask("Confirm Password")?;
        auth::register(&mut self.state, &username, &password, &confirm)?;

        self.success("Registration successful! Please login to continue.")
    }

    fn admin(&mut self) -> Result<()> {
        if self.state.config.admin_locked() {
            let input = self.ask("Admin Password")?;
            auth::admin_login(&self.state, &input)?;
        }
        self.admin_menu()
    }

    // =========================================================================
    // User menu
    // =========================================================================

    fn user_menu(&mut self, user: User) -> Result<()> {
        loop {
            let choice = self.choose(
                "USER MENU",
                &["Add Comment", "View Comments", "Edit Comment", "Delete Comment", "Logout"],
            )?;
            let result = match choice {
                1 => self.add_own(&user),
                2 => self.browse_comments(),
                3 => self.edit_own(&user),
                4 => self.delete_own(&user),
                _ => return Ok(()),
            };
            self.report(result)?;
        }
    }

    fn add_own(&mut self, user: &User) -> Result<()> {
        let text = self.ask("Comment")?;
        let category = self.ask_category(false)?.unwrap_or_default();
        let comment = comments::add(&mut self.state, user, &text, category)?;
        self.success(&format!("Comment {} saved", comment.id))
    }

    fn edit_own(&mut self, user: &User) -> Result<()> {
        let own = comments::list_own(&self.state, user);
        self.sparse_table(&own)?;

        let id = parse_number(&self.ask("Comment ID to edit")?)?;
        let text = self.ask("New comment (blank to keep)")?;
        let category = self.ask_category(true)?;
        comments::edit_own(&mut self.state, user, id, &text, category)?;
        self.success("Comment updated")
    }

    fn delete_own(&mut self, user: &User) -> Result<()> {
        let own = comments::list_own(&self.state, user);
        self.sparse_table(&own)?;

        let id = parse_number(&self.ask("Comment ID to delete")?)?;
        comments::delete_own(&mut self.state, user, id)?;
        self.success("Comment deleted")
    }

    fn browse_comments(&mut self) -> Result<()> {
        loop {
            let all = comments::list_all(&self.state).to_vec();
            self.comment_table(&all)?;

            match self.choose("VIEW COMMENTS", &["Search", "Sort", "Back"])? {
                1 => self.search_comments()?,
                2 => self.sort_comments()?,
                _ => return Ok(()),
            }
        }
    }

    fn search_comments(&mut self) -> Result<()> {
        let keyword = self.ask("Keyword")?;
        let hits = comments::search(&self.state, &keyword);
        self.sparse_table(&hits)
    }

    fn sort_comments(&mut self) -> Result<()> {
        let key = match self.choose("SORT BY", &["Comment length", "Category"])? {
            1 => SortKey::Text,
            _ => SortKey::Category,
        };
        let order = match self.choose("ORDER", &["Ascending", "Descending"])? {
            1 => SortOrder::Ascending,
            _ => SortOrder::Descending,
        };
        let sorted = comments::sorted(&self.state, key, order);
        self.comment_table(&sorted)
    }

    // =========================================================================
    // Admin menu
    // =========================================================================

    fn admin_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.choose("ADMIN MENU", &["Comments", "Users", "Stats", "Exit"])?;
            let result = match choice {
                1 => self.admin_comments(),
                2 => self.admin_users(),
                3 => self.show_stats(),
                _ => return Ok(()),
            };
            self.report(result)?;
        }
    }

    fn admin_comments(&mut self) -> Result<()> {
        loop {
            let all = comments::list_all(&self.state).to_vec();
            self.comment_table(&all)?;

            let choice = self.choose(
                "ADMIN > COMMENTS",
                &["Search", "Sort", "Add", "Edit", "Delete", "Back"],
            )?;
            let result = match choice {
                1 => self.search_comments(),
                2 => self.sort_comments(),
                3 => self.admin_add_comment(),
                4 => self.admin_edit_comment(),
                5 => self.admin_delete_comment(),
                _ => return Ok(()),
            };
            self.report(result)?;
        }
    }

    fn admin_add_comment(&mut self) -> Result<()> {
        let text = self.ask("Comment")?;
        let category = self.ask_category(false)?.unwrap_or_default();
        let comment = admin::add_comment(&mut self.state, &text, category)?;
        self.success(&format!("Comment {} saved", comment.id))
    }

    fn admin_edit_comment(&mut self) -> Result<()> {
        let id = parse_number(&self.ask("Comment ID to edit")?)?;
        let text = self.ask("New comment (blank to keep)")?;
        let category = self.ask_category(true)?;
        admin::edit_comment(&mut self.state, id, &text, category)?;
        self.success("Comment updated")
    }

    fn admin_delete_comment(&mut self) -> Result<()> {
        let id = parse_number(&self.ask("Comment ID to delete")?)?;
        admin::delete_comment(&mut self.state, id)?;
        self.success("Comment deleted")
    }

    fn admin_users(&mut self) -> Result<()> {
        loop {
            let users = admin::list_users(&self.state).to_vec();
            self.user_table(users.iter().enumerate())?;

            let choice = self.choose(
                "ADMIN > USERS",
                &["Search", "Add", "Edit", "Delete", "Back"],
            )?;
            let result = match choice {
                1 => self.admin_search_users(),
                2 => self.admin_add_user(),
                3 => self.admin_edit_user(),
                4 => self.admin_delete_user(),
                _ => return Ok(()),
            };
            self.report(result)?;
        }
    }

    fn admin_search_users(&mut self) -> Result<()> {
        let keyword = self.ask("Keyword")?;
        let hits = admin::search_users(&self.state, &keyword);
        self.user_table(hits.iter())
    }

    fn admin_add_user(&mut self) -> Result<()> {
        let username = self.ask("Username")?;
        let password = self.ask("Password")?;
        let confirm = self.ask("Confirm Password")?;
        let user = admin::create_user(&mut self.state, &username, &password, &confirm)?;
        self.success(&format!("User {} created", user.username))
    }

    fn admin_edit_user(&mut self) -> Result<()> {
        let number = parse_number(&self.ask("User number to edit")?)?;
        let username = self.ask("New username (blank to keep)")?;
        let password = self.ask("New password (blank to keep)")?;
        let confirm = if password.is_empty() {
            String::new()
        } else {
            self.ask("Confirm Password")?
        };
        admin::edit_user(&mut self.state, number, &username, &password, &confirm)?;
        self.success("User updated")
    }

    fn admin_delete_user(&mut self) -> Result<()> {
        let number = parse_number(&self.ask("User number to delete")?)?;
        let removed = admin::delete_user(&mut self.state, number)?;
        self.success(&format!("User {} deleted", removed.username))
    }

    fn show_stats(&mut self) -> Result<()> {
        let services::Stats {
            users,
            comments,
            positive,
            neutral,
            negative,
        } = admin::stats(&self.state);

        writeln!(self.out, "{}", format!("Users: {}", users).cyan())?;
        writeln!(self.out, "{}", format!("Comments: {}", comments).cyan())?;
        writeln!(self.out, "{}", format!("Positif: {}", positive).cyan())?;
        writeln!(self.out, "{}", format!("Netral: {}", neutral).cyan())?;
        writeln!(self.out, "{}", format!("Negatif: {}", negative).cyan())?;
        Ok(())
    }

    // =========================================================================
    // Prompts and rendering
    // =========================================================================

    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{}: ", label.blue())?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Ask for a category; with `optional`, a blank answer means "keep"
    fn ask_category(&mut self, optional: bool) -> Result<Option<Category>> {
        let label = if optional {
            "Category Positif/Netral/Negatif (blank to keep)"
        } else {
            "Category Positif/Netral/Negatif"
        };

        loop {
            let raw = self.ask(label)?;
            if optional && raw.trim().is_empty() {
                return Ok(None);
            }
            match raw.parse::<Category>() {
                Ok(category) => return Ok(Some(category)),
                Err(e) => self.report(Err(e))?,
            }
        }
    }

    /// Show a numbered menu and return the 1-based choice
    fn choose(&mut self, title: &str, items: &[&str]) -> Result<usize> {
        writeln!(self.out, "{}", "=".repeat(40).yellow())?;
        writeln!(self.out, "{}", format!("= {:^36} =", title).yellow())?;
        writeln!(self.out, "{}", "=".repeat(40).yellow())?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, item.cyan())?;
        }

        loop {
            let raw = self.ask("Choose")?;
            match raw.trim().parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n),
                _ => writeln!(self.out, "{}", "Invalid choice".red())?,
            }
        }
    }

    fn comment_table(&mut self, rows: &[Comment]) -> Result<()> {
        self.comment_rows(rows.iter())
    }

    fn sparse_table(&mut self, hits: &Sparse<Comment>) -> Result<()> {
        self.comment_rows(hits.iter().map(|(_, c)| c))
    }

    fn comment_rows<'a>(&mut self, rows: impl Iterator<Item = &'a Comment>) -> Result<()> {
        writeln!(
            self.out,
            "{}",
            format!("{:>3}  {:>4}  {:<40}  {}", "#", "ID", "Comment", "Category").bold()
        )?;

        let mut shown = 0;
        for (i, c) in rows.enumerate() {
            let category = match c.category {
                Category::Positif => c.category.label().green(),
                Category::Netral => c.category.label().normal(),
                Category::Negatif => c.category.label().red(),
            };
            writeln!(self.out, "{:>3}  {:>4}  {:<40}  {}", i + 1, c.id, c.text, category)?;
            shown += 1;
        }

        if shown == 0 {
            writeln!(self.out, "  (no comments)")?;
        }
        Ok(())
    }

    /// Rows are numbered by store position, which is what edit/delete take
    fn user_table<'a>(&mut self, rows: impl Iterator<Item = (usize, &'a User)>) -> Result<()> {
        writeln!(
            self.out,
            "{}",
            format!("{:>3}  {:>4}  {}", "No", "ID", "Username").bold()
        )?;

        let mut shown = 0;
        for (position, u) in rows {
            writeln!(self.out, "{:>3}  {:>4}  {}", position + 1, u.id, u.username)?;
            shown += 1;
        }

        if shown == 0 {
            writeln!(self.out, "  (no users)")?;
        }
        Ok(())
    }

    fn success(&mut self, msg: &str) -> Result<()> {
        writeln!(self.out, "{}", msg.green())?;
        Ok(())
    }

    /// Print recoverable errors and keep going; I/O failures end the session
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                writeln!(self.out, "{}", e.to_string().red())?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
