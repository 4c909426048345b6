//! Config command handlers

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::cli::{ConfigAction, SetContextArgs, SetTokenArgs};
use crate::error::{Result, ZedError};

use super::models::ContextConfig;
use super::store::ContextStore;

/// Dispatch config subcommands
pub fn run_config_command(action: &ConfigAction, store: &ContextStore) -> Result<()> {
    match action {
        ConfigAction::SetToken(args) => run_token_set(store, args),
        ConfigAction::GetTokens => run_token_list(store),
        ConfigAction::DeleteToken(args) => run_token_delete(store, &args.name),
        ConfigAction::SetContext(args) => run_context_set(store, args),
        ConfigAction::GetContexts => run_context_list(store),
        ConfigAction::UseContext(args) => run_context_use(store, &args.name),
        ConfigAction::CurrentContext => run_context_show(store),
        ConfigAction::DeleteContext(args) => run_context_delete(store, &args.name),
        ConfigAction::View => run_config_view(store),
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(Cell::new).collect::<Vec<_>>());
    table
}

/// Create or overwrite a token
fn run_token_set(store: &ContextStore, args: &SetTokenArgs) -> Result<()> {
    store.set_token(&args.name, &args.secret)?;
    println!("✓ Stored token '{}'", args.name);
    Ok(())
}

fn token_table(config: &ContextConfig) -> Table {
    let mut table = new_table(&["NAME", "USED BY"]);
    for name in config.token_names() {
        let users: Vec<&str> = config
            .contexts
            .iter()
            .filter(|(_, ctx)| ctx.token_name == name)
            .map(|(ctx_name, _)| ctx_name.as_str())
            .collect();
        table.add_row(vec![Cell::new(&name), Cell::new(users.join(", "))]);
    }
    table
}

/// List token names (secrets are never shown)
fn run_token_list(store: &ContextStore) -> Result<()> {
    let config = store.load()?;

    if config.tokens.is_empty() {
        println!("No tokens configured.");
        println!("\nUse 'zed config set-token <name> <secret>' to add one.");
        return Ok(());
    }

    println!("{}", token_table(&config));
    Ok(())
}

fn run_token_delete(store: &ContextStore, name: &str) -> Result<()> {
    store.remove_token(name)?;
    println!("✓ Deleted token '{}'", name);
    Ok(())
}

/// Create or overwrite a context
fn run_context_set(store: &ContextStore, args: &SetContextArgs) -> Result<()> {
    store.set_context(&args.name, &args.tenant, &args.token_name)?;
    println!("✓ Stored context '{}'", args.name);

    // Late binding is allowed, but point out the gap
    if store.secret(&args.token_name).is_err() {
        eprintln!(
            "Note: token '{}' is not stored yet. Add it with 'zed config set-token {} <secret>'.",
            args.token_name, args.token_name
        );
    }
    Ok(())
}

fn context_table(config: &ContextConfig) -> Table {
    let mut table = new_table(&["CURRENT", "NAME", "TENANT", "TOKEN"]);
    let current = config.active_context_name();
    for entry in config.context_entries() {
        let current_marker = if current == Some(entry.name.as_str()) {
            "*"
        } else {
            ""
        };
        let token_display = if config.tokens.contains_key(&entry.token_name) {
            entry.token_name.clone()
        } else {
            format!("{} (missing)", entry.token_name)
        };
        table.add_row(vec![
            Cell::new(current_marker),
            Cell::new(&entry.name),
            Cell::new(&entry.tenant),
            Cell::new(token_display),
        ]);
    }
    table
}

/// List all contexts
fn run_context_list(store: &ContextStore) -> Result<()> {
    let config = store.load()?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("\nUse 'zed config set-context <name> <tenant> <token-name>' to create one.");
        return Ok(());
    }

    println!("{}", context_table(&config));
    Ok(())
}

/// Switch the active context
fn run_context_use(store: &ContextStore, name: &str) -> Result<()> {
    store.use_context(name)?;
    println!("✓ Switched to context '{}'", name);
    Ok(())
}

/// Show the current context details
fn run_context_show(store: &ContextStore) -> Result<()> {
    let config = store.load()?;
    let name = config
        .active_context_name()
        .ok_or(ZedError::NoContextSelected)?;
    let ctx = config.context(name)?;

    println!("Current context: {}", name);
    println!("  Tenant: {}", ctx.tenant);
    println!("  Token:  {}", ctx.token_name);
    Ok(())
}

/// Delete a named context
fn run_context_delete(store: &ContextStore, name: &str) -> Result<()> {
    store.remove_context(name)?;
    println!("✓ Deleted context '{}'", name);
    Ok(())
}

/// Display the config file contents with secrets masked
fn run_config_view(store: &ContextStore) -> Result<()> {
    let config = store.load()?;
    let json = serde_json::to_string_pretty(&config.masked())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::NameArgs;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> ContextStore {
        ContextStore::with_path(dir.path().join("config.json"))
    }

    #[test]
    fn test_dispatch_end_to_end() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        run_config_command(
            &ConfigAction::SetToken(SetTokenArgs {
                name: "prod-key".to_string(),
                secret: "abc123".to_string(),
            }),
            &store,
        )
        .unwrap();
        run_config_command(
            &ConfigAction::SetContext(SetContextArgs {
                name: "prod".to_string(),
                tenant: "acme-tenant".to_string(),
                token_name: "prod-key".to_string(),
            }),
            &store,
        )
        .unwrap();
        run_config_command(
            &ConfigAction::UseContext(NameArgs {
                name: "prod".to_string(),
            }),
            &store,
        )
        .unwrap();

        assert_eq!(store.current_context().unwrap(), Some("prod".to_string()));
        run_config_command(&ConfigAction::CurrentContext, &store).unwrap();
        run_config_command(&ConfigAction::GetContexts, &store).unwrap();
        run_config_command(&ConfigAction::GetTokens, &store).unwrap();
        run_config_command(&ConfigAction::View, &store).unwrap();
    }

    #[test]
    fn test_use_context_nonexistent_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let err = run_context_use(&store, "nonexistent").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_current_context_without_selection() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        assert!(matches!(
            run_context_show(&store),
            Err(ZedError::NoContextSelected)
        ));
    }

    #[test]
    fn test_delete_nonexistent_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        assert!(run_context_delete(&store, "nope").is_err());
        assert!(run_token_delete(&store, "nope").is_err());
    }

    #[test]
    fn test_token_table_shows_names_and_users_only() {
        let mut config = ContextConfig::default();
        config.set_token("prod-key", "TOPSECRET").unwrap();
        config.set_context("prod", "acme", "prod-key").unwrap();
        config.set_context("prod-eu", "acme-eu", "prod-key").unwrap();

        let rendered = token_table(&config).to_string();
        assert!(rendered.contains("prod-key"));
        assert!(rendered.contains("prod, prod-eu"));
        assert!(!rendered.contains("TOPSECRET"));
    }

    #[test]
    fn test_context_table_marks_current_and_missing_tokens() {
        let mut config = ContextConfig::default();
        config.set_token("prod-key", "s").unwrap();
        config.set_context("prod", "acme", "prod-key").unwrap();
        config.set_context("dev", "acme-dev", "dev-key").unwrap();
        config.use_context("prod").unwrap();

        let rendered = context_table(&config).to_string();
        assert!(rendered.contains('*'));
        assert!(rendered.contains("dev-key (missing)"));
        assert!(!rendered.contains("prod-key (missing)"));
    }
}
