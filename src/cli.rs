use crate::{
    config::Config, filter, form::Submission, library::Library, transcript::Transcript, view,
    Args,
};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::RefCell;
use std::path::PathBuf;

pub struct Context {
    pub args: Args,
    pub root: PathBuf,
    pub config: Config,
    pub library: Library,
    pub transcript: RefCell<Transcript>,
    pub session_id: String,
    pub query: RefCell<String>,
    pub tracing: RefCell<bool>,
}

/// One-shot filter mode: render the listing for a single query and exit.
pub fn run_query_once(ctx: &Context, query: &str) -> Result<()> {
    let visible = filter::visible_indices(query, ctx.library.articles());
    let _ = ctx
        .transcript
        .borrow_mut()
        .search_query(query, visible.len(), ctx.library.len());
    print!(
        "{}",
        view::render_listing(
            ctx.library.articles(),
            &visible,
            query,
            ctx.config.ui.page_size
        )
    );
    Ok(())
}

/// One-shot contact mode using the --name/--email/--message flags.
/// Returns whether the submission was accepted.
pub fn run_contact_once(ctx: &Context) -> Result<bool> {
    if !ctx.config.contact.enabled {
        // Mirrors a page without the form: nothing to attach to, no error.
        eprintln!("Contact form is not available.");
        return Ok(true);
    }

    let submission = Submission::new(&ctx.args.name, &ctx.args.email, &ctx.args.message);
    let _ = ctx
        .transcript
        .borrow_mut()
        .contact_attempt(&submission.name, &submission.email);

    let errors = submission.validate();
    if !errors.is_empty() {
        let _ = ctx.transcript.borrow_mut().contact_rejected(&errors);
        eprint!("{}", view::render_alert(&errors));
        return Ok(false);
    }

    let recipient = &ctx.config.contact.recipient;
    let _ = ctx
        .transcript
        .borrow_mut()
        .contact_submitted(&submission.name, &submission.email, recipient);
    print!("{}", submission.compose(recipient));
    Ok(true)
}

pub fn run_repl(ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("kiosk - type /help for commands, /exit to quit");
    if ctx.library.is_empty() {
        println!(
            "No articles found in {} (search is disabled)",
            ctx.config.library.articles_dir.display()
        );
    } else {
        render_current(&ctx);
    }

    loop {
        match rl.readline("search> ") {
            Ok(line) => {
                let line = line.trim().to_string();

                if line.starts_with('/') {
                    rl.add_history_entry(&line)?;
                    if handle_command(&ctx, &line, &mut rl) {
                        break;
                    }
                    continue;
                }

                // A plain line is the new search query; an empty line
                // clears it and restores full visibility.
                if !line.is_empty() {
                    rl.add_history_entry(&line)?;
                }
                if ctx.library.is_empty() {
                    continue;
                }
                *ctx.query.borrow_mut() = line;
                render_current(&ctx);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Re-run the filter for the current query and print the listing.
fn render_current(ctx: &Context) {
    let query = ctx.query.borrow().clone();
    let visible = filter::visible_indices(&query, ctx.library.articles());

    if *ctx.tracing.borrow() {
        eprintln!(
            "[TRACE] query={:?} shown={}/{}",
            query,
            visible.len(),
            ctx.library.len()
        );
    }
    let _ = ctx
        .transcript
        .borrow_mut()
        .search_query(&query, visible.len(), ctx.library.len());

    print!(
        "{}",
        view::render_listing(
            ctx.library.articles(),
            &visible,
            &query,
            ctx.config.ui.page_size
        )
    );
}

fn handle_command(ctx: &Context, cmd: &str, rl: &mut DefaultEditor) -> bool {
    let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
    match parts[0] {
        "/exit" | "/quit" => return true,
        "/help" => {
            println!("Commands:");
            println!("  /exit            - quit");
            println!("  /help            - show commands");
            println!("  /all             - clear the query, show every article");
            println!("  /show <n>        - show article <n> in full");
            println!("  /categories      - list categories with article counts");
            println!("  /contact         - open the contact form");
            println!("  /session         - show session info");
            println!("  /trace           - toggle filter tracing");
            println!("Any other input filters articles by title and body.");
        }
        "/all" => {
            ctx.query.borrow_mut().clear();
            if !ctx.library.is_empty() {
                render_current(ctx);
            }
        }
        "/show" => {
            if parts.len() > 1 {
                match parts[1].trim().parse::<usize>() {
                    Ok(n) => match ctx.library.get(n) {
                        Some(article) => print!("{}", view::render_article(article)),
                        None => println!("No article number {}", n),
                    },
                    Err(_) => println!("Invalid article number: {}", parts[1].trim()),
                }
            } else {
                println!("Usage: /show <n>");
            }
        }
        "/categories" => {
            print!("{}", view::render_categories(&ctx.library.categories()));
        }
        "/contact" => {
            run_contact_form(ctx, rl);
        }
        "/session" => {
            println!("Session: {}", ctx.session_id);
            println!("Root: {}", ctx.root.display());
            println!("Transcript: {:?}", ctx.transcript.borrow().path);
            println!("Articles: {}", ctx.library.len());
        }
        "/trace" => {
            let mut t = ctx.tracing.borrow_mut();
            *t = !*t;
            println!("Tracing: {}", if *t { "on" } else { "off" });
        }
        _ => println!("Unknown command: {}", parts[0]),
    }
    false
}

/// Interactive contact flow: prompt for the three fields, validate them as
/// a whole, and either block with an alert or show the composed message.
fn run_contact_form(ctx: &Context, rl: &mut DefaultEditor) {
    if !ctx.config.contact.enabled {
        println!("Contact form is not available.");
        return;
    }

    let name = match prompt_field(rl, "Name: ") {
        Some(v) => v,
        None => {
            println!("Cancelled.");
            return;
        }
    };
    let email = match prompt_field(rl, "Email: ") {
        Some(v) => v,
        None => {
            println!("Cancelled.");
            return;
        }
    };
    let message = match prompt_field(rl, "Message: ") {
        Some(v) => v,
        None => {
            println!("Cancelled.");
            return;
        }
    };

    let submission = Submission::new(&name, &email, &message);
    let _ = ctx
        .transcript
        .borrow_mut()
        .contact_attempt(&submission.name, &submission.email);

    let errors = submission.validate();
    if !errors.is_empty() {
        let _ = ctx.transcript.borrow_mut().contact_rejected(&errors);
        print!("{}", view::render_alert(&errors));
        // Blocking, like a modal dialog: hold until acknowledged.
        let _ = rl.readline("Press Enter to continue ");
        return;
    }

    let recipient = &ctx.config.contact.recipient;
    let _ = ctx
        .transcript
        .borrow_mut()
        .contact_submitted(&submission.name, &submission.email, recipient);
    println!("Message sent to {}:", recipient);
    print!("{}", submission.compose(recipient));
}

fn prompt_field(rl: &mut DefaultEditor, prompt: &str) -> Option<String> {
    rl.readline(prompt).ok()
}
