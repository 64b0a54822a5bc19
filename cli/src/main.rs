use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use client::i18n::{Locale, MessageKey};
use client::net::{ApiClient, ClientError, IngredientQuery};
use client::render::{self, PanelData};
use client::state::auth::AuthState;
use client::state::forms::{self, IngredientForm, LoginForm, PreferenceForm, RegisterForm};
use client::state::ui::{Panel, UiState, View};
use client::util::photo;
use models::{
    CookingTipRequest, DEFAULT_SOON_DAYS, IngredientPatch, MealPlanRequest, NewMealPlan, NewRecipe, NewShoppingItem,
    NutritionRequest, PriceRequest, SubstituteRequest,
};
use serde::Serialize;
use time::Date;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid input: {0:?}")]
    Form(MessageKey),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
}

impl CliError {
    fn message(&self, locale: Locale) -> String {
        match self {
            Self::Client(err) => err.message(locale),
            Self::Form(key) => locale.text(*key).to_owned(),
            Self::Json(err) => format!("{}: {err}", locale.text(MessageKey::ErrDecode)),
            Self::Read { .. } => self.to_string(),
        }
    }
}

impl From<MessageKey> for CliError {
    fn from(key: MessageKey) -> Self {
        Self::Form(key)
    }
}

#[derive(Parser, Debug)]
#[command(name = "pantry", about = "Pantry ingredient manager and AI cooking assistant")]
struct Cli {
    #[arg(long, env = "PANTRY_BASE_URL", default_value = "http://127.0.0.1:3000", global = true)]
    base_url: String,

    #[arg(long, env = "PANTRY_SESSION_TOKEN", global = true, hide_env_values = true)]
    session_token: Option<String>,

    /// Output language (`ko`, `en`, `ko-KR`, ...).
    #[arg(long, env = "PANTRY_LANG", default_value = "ko", global = true)]
    lang: Locale,

    /// Print raw JSON instead of formatted text.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and print the session token to export as `PANTRY_SESSION_TOKEN`.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Me,
    Dashboard {
        /// Expiring-soon window in days.
        #[arg(long)]
        days: Option<i64>,
    },
    /// Draw one main-screen panel (`dashboard`, `ingredients`, `meal-plan`,
    /// `shopping`, ...). Always prints text.
    Show {
        panel: Panel,
    },
    Ingredient(IngredientCommand),
    Recipe(RecipeCommand),
    MealPlan(MealPlanCommand),
    Shopping(ShoppingCommand),
    Ai(AiCommand),
}

#[derive(Args, Debug)]
struct IngredientCommand {
    #[command(subcommand)]
    command: IngredientSubcommand,
}

#[derive(Subcommand, Debug)]
enum IngredientSubcommand {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    Get {
        id: Uuid,
    },
    Add(IngredientArgs),
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        purchase_date: Option<String>,
        #[arg(long)]
        expiry_date: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: Uuid,
    },
    Expiring {
        #[arg(long)]
        days: Option<i64>,
    },
}

#[derive(Args, Debug)]
struct IngredientArgs {
    name: String,
    #[arg(long, default_value = "")]
    quantity: String,
    #[arg(long, default_value = "")]
    unit: String,
    #[arg(long, default_value = "")]
    purchase_date: String,
    #[arg(long, default_value = "")]
    expiry_date: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    category: String,
}

#[derive(Args, Debug)]
struct RecipeCommand {
    #[command(subcommand)]
    command: RecipeSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecipeSubcommand {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Get {
        id: Uuid,
    },
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated ingredient list.
        #[arg(long, default_value = "")]
        ingredients: String,
        #[arg(long, default_value = "")]
        instructions: String,
        /// Minutes.
        #[arg(long)]
        cooking_time: Option<i32>,
        #[arg(long, default_value = "")]
        difficulty: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
struct MealPlanCommand {
    #[command(subcommand)]
    command: MealPlanSubcommand,
}

#[derive(Subcommand, Debug)]
enum MealPlanSubcommand {
    List {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Add {
        /// `YYYY-MM-DD`
        date: String,
        /// `breakfast`, `lunch`, `dinner` or `snack`.
        meal_type: String,
        #[arg(long)]
        recipe_id: Option<Uuid>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Args, Debug)]
struct ShoppingCommand {
    #[command(subcommand)]
    command: ShoppingSubcommand,
}

#[derive(Subcommand, Debug)]
enum ShoppingSubcommand {
    List,
    Add {
        name: String,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// Mark an item purchased (or open again with `--undo`).
    Check {
        id: Uuid,
        #[arg(long, default_value_t = false)]
        undo: bool,
    },
    Delete {
        id: Uuid,
    },
    /// Add the recipe's ingredients you do not hold.
    FromRecipe {
        recipe_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct AiCommand {
    #[command(subcommand)]
    command: AiSubcommand,
}

#[derive(Subcommand, Debug)]
enum AiSubcommand {
    Recommend {
        #[arg(long, default_value = "")]
        preferences: String,
        #[arg(long, default_value = "")]
        allergies: String,
    },
    MealPlan {
        #[arg(long, default_value_t = 3)]
        days: u8,
        #[arg(long, default_value = "")]
        goals: String,
        #[arg(long, default_value = "")]
        preferences: String,
        #[arg(long, default_value = "")]
        allergies: String,
    },
    /// Analyse the given meals, or the coming week's plan when none are given.
    Nutrition {
        meals: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Estimate prices for the given items, or for your ingredients.
    Price {
        items: Vec<String>,
    },
    Substitute {
        ingredient: String,
        #[arg(long, default_value = "")]
        recipe: String,
    },
    Tip {
        recipe: String,
        #[arg(long, default_value_t = 1)]
        step: u32,
    },
    /// Recognize ingredients in a photo (JPEG, PNG, WebP or GIF).
    Recognize {
        photo: PathBuf,
        /// Add every recognized ingredient to the pantry.
        #[arg(long, default_value_t = false)]
        add: bool,
    },
}

#[derive(Debug)]
struct CliContext {
    api: ApiClient,
    locale: Locale,
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let locale = cli.lang;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message(locale));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut api = ApiClient::new(cli.base_url)?;
    api.set_token(cli.session_token);
    let ctx = CliContext { api, locale: cli.lang, json: cli.json };

    match cli.command {
        Command::Ping => {
            ctx.api.health().await?;
            println!("ok");
            Ok(())
        }
        Command::Register { email, name, password } => {
            let req = RegisterForm { email, name, password }.to_request()?;
            let response = ctx.api.register(&req).await?;
            ctx.emit(&response, |r| {
                format!("{}\ntoken: {}", render::auth::render_auth_result(r, true, ctx.locale), r.token)
            })
        }
        Command::Login { email, password } => {
            let req = LoginForm { email, password }.to_request()?;
            let response = ctx.api.login(&req).await?;
            ctx.emit(&response, |r| {
                format!("{}\ntoken: {}", render::auth::render_auth_result(r, false, ctx.locale), r.token)
            })
        }
        Command::Logout => {
            ctx.api.logout().await?;
            ctx.notice(MessageKey::LogoutSuccess);
            Ok(())
        }
        Command::Me => {
            let user = ctx.api.me().await?;
            ctx.emit(&user, |u| render::auth::render_profile(u, ctx.locale))
        }
        Command::Dashboard { days } => {
            let stats = ctx.api.dashboard(days).await?;
            ctx.emit(&stats, |s| render::dashboard::render_dashboard(s, ctx.locale))
        }
        Command::Show { panel } => show_panel(&ctx, panel).await,
        Command::Ingredient(cmd) => run_ingredient(&ctx, cmd.command).await,
        Command::Recipe(cmd) => run_recipe(&ctx, cmd.command).await,
        Command::MealPlan(cmd) => run_meal_plan(&ctx, cmd.command).await,
        Command::Shopping(cmd) => run_shopping(&ctx, cmd.command).await,
        Command::Ai(cmd) => run_ai(&ctx, cmd.command).await,
    }
}

/// Resolve the view like the web app does, load the panel, and print it.
/// A rejected session ends on the login screen instead of the panel.
async fn show_panel(ctx: &CliContext, panel: Panel) -> Result<(), CliError> {
    let mut auth = AuthState::from_token(ctx.api.token().map(str::to_owned));
    let mut ui = UiState::new(ctx.locale);
    ui.open(panel);

    let mut data = PanelData::default();
    let mut failure = None;
    if let View::Panel(panel) = ui.view(&auth) {
        if let Err(err) = load_panel(ctx, panel, &mut data).await {
            ui.notify_error(&mut auth, &err);
            failure = Some(err);
        }
    }

    match ui.view(&auth) {
        View::Panel(panel) => {
            let today = models::date::today();
            print!("{}", ensure_newline(render::render_panel(panel, &data, ctx.locale, today)));
        }
        View::Login | View::Register => {
            println!("== {} ==", ctx.locale.text(MessageKey::TitleLogin));
        }
    }
    if let Some(notice) = &ui.message {
        eprintln!("{}", notice.text);
    }
    match failure {
        Some(err) => Err(err.into()),
        None if !auth.is_authenticated() => Err(ClientError::MissingToken.into()),
        None => Ok(()),
    }
}

async fn load_panel(ctx: &CliContext, panel: Panel, data: &mut PanelData) -> Result<(), ClientError> {
    match panel {
        Panel::Dashboard => data.stats = Some(ctx.api.dashboard(Some(data.soon_days)).await?),
        Panel::Ingredients => data.ingredients = ctx.api.list_ingredients(&IngredientQuery::default()).await?,
        Panel::MealPlan => data.meal_plans = ctx.api.list_meal_plans(None, None).await?,
        Panel::Shopping => data.shopping = ctx.api.shopping_list().await?,
        Panel::Recommend | Panel::Nutrition | Panel::Price => {}
    }
    Ok(())
}

async fn run_ingredient(ctx: &CliContext, command: IngredientSubcommand) -> Result<(), CliError> {
    let today = models::date::today();
    match command {
        IngredientSubcommand::List { category, location } => {
            let items = ctx.api.list_ingredients(&IngredientQuery { category, location }).await?;
            ctx.emit(&items, |i| render::ingredients::render_ingredients(i, today, DEFAULT_SOON_DAYS, ctx.locale))
        }
        IngredientSubcommand::Get { id } => {
            let item = ctx.api.get_ingredient(id).await?;
            ctx.emit(&item, |i| render::ingredients::render_ingredient(i, today, DEFAULT_SOON_DAYS, ctx.locale))
        }
        IngredientSubcommand::Add(args) => {
            let form = IngredientForm {
                name: args.name,
                quantity: args.quantity,
                unit: args.unit,
                purchase_date: args.purchase_date,
                expiry_date: args.expiry_date,
                location: args.location,
                category: args.category,
            };
            let item = ctx.api.create_ingredient(&form.to_request()?).await?;
            ctx.notice(MessageKey::IngredientAdded);
            ctx.emit(&item, |i| render::ingredients::render_ingredient(i, today, DEFAULT_SOON_DAYS, ctx.locale))
        }
        IngredientSubcommand::Update { id, name, quantity, unit, purchase_date, expiry_date, location, category } => {
            let patch = IngredientPatch {
                name,
                quantity: quantity.as_deref().map(forms::parse_quantity).transpose()?,
                unit,
                purchase_date: optional_date(purchase_date.as_deref())?,
                expiry_date: optional_date(expiry_date.as_deref())?,
                location,
                category,
            };
            let item = ctx.api.update_ingredient(id, &patch).await?;
            ctx.notice(MessageKey::IngredientUpdated);
            ctx.emit(&item, |i| render::ingredients::render_ingredient(i, today, DEFAULT_SOON_DAYS, ctx.locale))
        }
        IngredientSubcommand::Delete { id } => {
            ctx.api.delete_ingredient(id).await?;
            ctx.notice(MessageKey::IngredientDeleted);
            Ok(())
        }
        IngredientSubcommand::Expiring { days } => {
            let items = ctx.api.expiring_ingredients(days).await?;
            let window = days.unwrap_or(DEFAULT_SOON_DAYS);
            ctx.emit(&items, |i| render::ingredients::render_ingredients(i, today, window, ctx.locale))
        }
    }
}

async fn run_recipe(ctx: &CliContext, command: RecipeSubcommand) -> Result<(), CliError> {
    match command {
        RecipeSubcommand::List { category } => {
            let recipes = ctx.api.list_recipes(category.as_deref()).await?;
            ctx.emit(&recipes, |r| render::recipes::render_recipes(r, ctx.locale))
        }
        RecipeSubcommand::Get { id } => {
            let recipe = ctx.api.get_recipe(id).await?;
            ctx.emit(&recipe, |r| render::recipes::render_recipe(r, ctx.locale))
        }
        RecipeSubcommand::Add { name, description, ingredients, instructions, cooking_time, difficulty, category } => {
            if name.trim().is_empty() {
                return Err(CliError::Form(MessageKey::FormNameRequired));
            }
            let input = NewRecipe {
                name,
                description,
                ingredients_list: ingredients,
                instructions,
                cooking_time,
                difficulty,
                category,
                nutrition_info: String::new(),
            };
            let recipe = ctx.api.create_recipe(&input).await?;
            ctx.notice(MessageKey::Saved);
            ctx.emit(&recipe, |r| render::recipes::render_recipe(r, ctx.locale))
        }
        RecipeSubcommand::Delete { id } => {
            ctx.api.delete_recipe(id).await?;
            ctx.notice(MessageKey::Deleted);
            Ok(())
        }
    }
}

async fn run_meal_plan(ctx: &CliContext, command: MealPlanSubcommand) -> Result<(), CliError> {
    match command {
        MealPlanSubcommand::List { from, to } => {
            let from = optional_date(from.as_deref())?;
            let to = optional_date(to.as_deref())?;
            let plans = ctx.api.list_meal_plans(from, to).await?;
            ctx.emit(&plans, |p| render::recipes::render_meal_plans(p, ctx.locale))
        }
        MealPlanSubcommand::Add { date, meal_type, recipe_id, notes } => {
            let plan_date = optional_date(Some(date.as_str()))?.ok_or(MessageKey::FormDateInvalid)?;
            let input = NewMealPlan { recipe_id, plan_date, meal_type, notes };
            let plan = ctx.api.create_meal_plan(&input).await?;
            ctx.notice(MessageKey::Saved);
            ctx.emit(&plan, |p| render::recipes::render_meal_plans(std::slice::from_ref(p), ctx.locale))
        }
        MealPlanSubcommand::Delete { id } => {
            ctx.api.delete_meal_plan(id).await?;
            ctx.notice(MessageKey::Deleted);
            Ok(())
        }
    }
}

async fn run_shopping(ctx: &CliContext, command: ShoppingSubcommand) -> Result<(), CliError> {
    match command {
        ShoppingSubcommand::List => {
            let items = ctx.api.shopping_list().await?;
            ctx.emit(&items, |i| render::shopping::render_shopping(i, ctx.locale))
        }
        ShoppingSubcommand::Add { name, quantity, unit } => {
            if name.trim().is_empty() {
                return Err(CliError::Form(MessageKey::FormNameRequired));
            }
            let item = ctx.api.add_shopping_item(&NewShoppingItem { item_name: name, quantity, unit }).await?;
            ctx.emit(&item, |i| render::shopping::render_shopping(std::slice::from_ref(i), ctx.locale))
        }
        ShoppingSubcommand::Check { id, undo } => {
            let item = ctx.api.set_purchased(id, !undo).await?;
            ctx.emit(&item, |i| render::shopping::render_shopping(std::slice::from_ref(i), ctx.locale))
        }
        ShoppingSubcommand::Delete { id } => {
            ctx.api.delete_shopping_item(id).await?;
            ctx.notice(MessageKey::Deleted);
            Ok(())
        }
        ShoppingSubcommand::FromRecipe { recipe_id } => {
            let added = ctx.api.add_missing_from_recipe(recipe_id).await?;
            ctx.emit(&added, |i| render::shopping::render_shopping(i, ctx.locale))
        }
    }
}

async fn run_ai(ctx: &CliContext, command: AiSubcommand) -> Result<(), CliError> {
    let reply = match command {
        AiSubcommand::Recognize { photo, add } => return recognize(ctx, &photo, add).await,
        AiSubcommand::Recommend { preferences, allergies } => {
            let req = PreferenceForm { preferences_text: preferences, allergies_text: allergies }.to_request();
            ctx.api.recommend_recipes(&req).await?
        }
        AiSubcommand::MealPlan { days, goals, preferences, allergies } => {
            let prefs = PreferenceForm { preferences_text: preferences, allergies_text: allergies }.to_request();
            let req = MealPlanRequest { days, goals, preferences: prefs.preferences, allergies: prefs.allergies };
            ctx.api.plan_meals(&req).await?
        }
        AiSubcommand::Nutrition { meals, notes } => {
            ctx.api.analyze_nutrition(&NutritionRequest { meals, notes }).await?
        }
        AiSubcommand::Price { items } => ctx.api.estimate_prices(&PriceRequest { items }).await?,
        AiSubcommand::Substitute { ingredient, recipe } => {
            ctx.api.suggest_substitutes(&SubstituteRequest { ingredient, recipe }).await?
        }
        AiSubcommand::Tip { recipe, step } => ctx.api.cooking_tip(&CookingTipRequest { recipe, step }).await?,
    };
    ctx.emit(&reply, |r| render::ai::render_ai_reply(r, ctx.locale))
}

async fn recognize(ctx: &CliContext, path: &Path, add: bool) -> Result<(), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    let found = ctx.api.recognize_ingredients(&photo::photo_request(&bytes, mime_for(path))).await?;
    ctx.emit(&found, |f| render::ai::render_recognized(f, ctx.locale))?;
    if add {
        let today = models::date::today();
        for item in &found.ingredients {
            ctx.api.create_ingredient(&item.to_new_ingredient(today)).await?;
        }
        if !found.ingredients.is_empty() {
            ctx.notice(MessageKey::IngredientAdded);
        }
    }
    Ok(())
}

/// Image type from the file extension; the server sniffs anything else.
fn mime_for(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

impl CliContext {
    /// Print `value` as pretty JSON with `--json`, otherwise as rendered text.
    fn emit<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> String) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", ensure_newline(render(value)));
        }
        Ok(())
    }

    /// Success notice; suppressed with `--json` so stdout stays parseable.
    fn notice(&self, key: MessageKey) {
        if !self.json {
            println!("{}", self.locale.text(key));
        }
    }
}

fn optional_date(raw: Option<&str>) -> Result<Option<Date>, MessageKey> {
    raw.map_or(Ok(None), forms::parse_optional_date)
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
