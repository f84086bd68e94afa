//! Petition Client command line
//!
//! `petition-client [ROUTE [PAGE]]` shows the screen a route resolves to.
//! `petition-client login EMAIL PASSWORD` and `petition-client logout` manage
//! the stored session.

use petition_client::errors::{user_message, FormKind};
use petition_client::flows::{self, EditSession};
use petition_client::models::Petition;
use petition_client::pagination::Paginator;
use petition_client::routes::{guard, Route};
use petition_client::views::{ExploreView, MyPetitionsView, PetitionView};
use petition_client::{init_tracing, ApiClient, ClientConfig, Session, SqliteStorage};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::debug!("API: {}", config.api_url);
    tracing::debug!("Session path: {:?}", config.session_path);

    let storage = SqliteStorage::open(&config.session_path).await?;
    let mut session = Session::restore(storage).await?;
    let api = ApiClient::new(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let requested = match args.first().map(String::as_str) {
        Some("login") => {
            let (Some(email), Some(password)) = (args.get(1), args.get(2)) else {
                eprintln!("usage: petition-client login EMAIL PASSWORD");
                std::process::exit(2);
            };
            match flows::login(&api, &mut session, email, password).await {
                Ok(route) => route,
                Err(e) => {
                    let message = user_message(FormKind::Login, &e).unwrap_or_else(|| e.to_string());
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
            }
        }
        Some("logout") => flows::logout(&api, &mut session).await?,
        Some(path) => match Route::parse(path) {
            Some(route) => route,
            None => {
                eprintln!("Unknown route: {}", path);
                std::process::exit(2);
            }
        },
        None => Route::Explore,
    };
    let page = args
        .get(1)
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);

    let mut route = guard(requested, session.credentials());
    for _ in 0..MAX_REDIRECTS {
        match show(&api, &config, &session, route, page).await? {
            Some(next) => {
                tracing::info!("Redirected from {} to {}", route, next);
                route = guard(next, session.credentials());
            }
            None => return Ok(()),
        }
    }

    eprintln!("Too many redirects at {}", route);
    std::process::exit(1);
}

/// Print one screen. Returns the route to redirect to when the screen can not
/// be shown.
async fn show(
    api: &ApiClient,
    config: &ClientConfig,
    session: &Session<SqliteStorage>,
    route: Route,
    page: usize,
) -> Result<Option<Route>, Box<dyn std::error::Error>> {
    let credentials = session.credentials();
    println!("== {} ==", route);

    match route {
        Route::Explore => {
            let mut view = ExploreView::new(config.explore_page_size);
            view.load(api).await;
            if let Some(message) = view.banner.message() {
                println!("! {}", message);
            }
            view.petitions.set_page(page);
            print_list(&view.petitions, |p| view.category_name(p.category_id).to_string());
        }
        Route::Petition(id) => {
            let view = match PetitionView::load(api, id, config.list_page_size).await {
                Ok(view) => view,
                Err(redirect) => return Ok(Some(redirect)),
            };
            let d = &view.details;
            println!("{} [{}]", d.title, view.category_name());
            println!("by {} {} on {}", d.owner_first_name, d.owner_last_name, d.creation_date);
            println!("{}", d.description);
            println!("{} supporters, ${} raised", d.number_of_supporters, d.money_raised);
            for tier in &d.support_tiers {
                let marker = if view.can_support(credentials, tier.support_tier_id) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {} (${}): {} [{} supporters]",
                    marker,
                    tier.title,
                    tier.cost,
                    tier.description,
                    view.tier_supporters(tier.support_tier_id)
                );
            }
            for s in &view.supporters {
                println!(
                    "  {} {}: {}",
                    s.supporter_first_name,
                    s.supporter_last_name,
                    s.message.as_deref().unwrap_or("")
                );
            }
            println!("-- more by this owner --");
            print_list(&view.by_owner, |p| p.owner_first_name.clone());
            println!("-- similar petitions --");
            print_list(&view.similar, |p| p.owner_first_name.clone());
        }
        Route::EditPetition(id) => {
            let edit = match EditSession::load(api, credentials, id).await {
                Ok(edit) => edit,
                Err(redirect) => return Ok(Some(redirect)),
            };
            println!("{}", edit.draft.title);
            println!("{}", edit.draft.description);
            for (i, tier) in edit.draft.tiers().iter().enumerate() {
                let lock = if tier.has_support { " (locked)" } else { "" };
                println!("{}. {} ${}{}", i + 1, tier.title, tier.cost, lock);
            }
        }
        Route::MyPetitions => {
            let view = MyPetitionsView::load(api, credentials, config.list_page_size).await?;
            if let Some(message) = view.banner.message() {
                println!("! {}", message);
            }
            println!("-- owned --");
            print_list(&view.owned, |p| p.number_of_supporters.to_string());
            println!("-- supported --");
            print_list(&view.supported, |p| p.owner_first_name.clone());
        }
        Route::EditProfile => {
            let Some(credentials) = credentials else {
                return Ok(Some(Route::Login));
            };
            let profile = flows::load_profile(api, credentials).await?;
            println!("{} {}", profile.user.first_name, profile.user.last_name);
            println!("{}", profile.user.email.as_deref().unwrap_or(""));
            println!(
                "picture: {}",
                if profile.has_picture { "yes" } else { "default" }
            );
        }
        Route::Login | Route::Register | Route::CreatePetition => {
            println!("This screen is a form; use the library flows to submit it.");
        }
    }

    Ok(None)
}

fn print_list(list: &Paginator<Petition>, extra: impl Fn(&Petition) -> String) {
    if list.is_empty() {
        println!("(none)");
        return;
    }
    for p in list.current() {
        println!(
            "#{} {} | from ${} | {}",
            p.petition_id,
            p.title,
            p.supporting_cost,
            extra(p)
        );
    }
    if list.has_multiple_pages() {
        println!("page {} of {}", list.page(), list.page_count());
    }
}
