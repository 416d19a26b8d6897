//! Command handlers, one group per tab of the terminal: users, products,
//! orders, and payments.
//!
//! Handlers pass raw tokens straight to the core managers and turn the results
//! into display lines. After a mutation the affected listing is rendered again.

use crate::{
    core::{
        input::parse_integer,
        order::{self, OrderDraft},
        payment, product, user,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::info;

pub(crate) const HELP_TEXT: &str = "Available commands:\n\
    users | user list                      List users\n\
    user add <name> <role> <password>      Add a user (role: Admin or Staff)\n\
    user delete <id>                       Delete a user\n\
    products | product list                List products\n\
    product add <name> <price> <stock>     Add a product\n\
    product delete <id>                    Delete a product\n\
    order choices                          Show selectable users and products\n\
    order stage <user> <product> <qty>     Stage an order line\n\
    order show                             Show staged lines\n\
    order remove <n>                       Remove staged line n\n\
    order clear                            Discard all staged lines\n\
    order place                            Commit all staged lines\n\
    orders                                 List committed orders\n\
    payment record <order_id> <amount>     Record a payment\n\
    payments | payment list                List payments\n\
    help                                   Show this text\n\
    quit                                   Leave the terminal\n\
    Wrap values containing spaces in double quotes.";

/// Returns the token at `index`, or an empty field when it was left out.
pub(crate) fn field<'a>(args: &[&'a str], index: usize) -> &'a str {
    args.get(index).copied().unwrap_or("")
}

/// Turns an optional id token into a selection.
pub(crate) fn selection(args: &[&str], index: usize, name: &'static str) -> Result<Option<i64>> {
    args.get(index)
        .map(|token| parse_integer(name, token))
        .transpose()
}

fn render<T: ToString>(rows: &[T], empty: &str) -> Vec<String> {
    if rows.is_empty() {
        return vec![empty.to_string()];
    }
    rows.iter().map(ToString::to_string).collect()
}

// ----- Users -----

pub(crate) async fn list_users(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(render(&user::list_users(db).await?, "(no users)"))
}

pub(crate) async fn add_user(db: &DatabaseConnection, args: &[&str]) -> Result<Vec<String>> {
    let created = user::add_user(db, field(args, 0), field(args, 1), field(args, 2)).await?;
    let mut lines = vec![format!("User added with ID {}.", created.id)];
    lines.extend(list_users(db).await?);
    Ok(lines)
}

pub(crate) async fn delete_user(db: &DatabaseConnection, args: &[&str]) -> Result<Vec<String>> {
    let affected = user::delete_user(db, selection(args, 0, "User ID")?).await?;
    let mut lines = vec![format!("{affected} user(s) deleted.")];
    lines.extend(list_users(db).await?);
    Ok(lines)
}

// ----- Products -----

pub(crate) async fn list_products(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(render(&product::list_products(db).await?, "(no products)"))
}

pub(crate) async fn add_product(db: &DatabaseConnection, args: &[&str]) -> Result<Vec<String>> {
    let created =
        product::add_product(db, field(args, 0), field(args, 1), field(args, 2)).await?;
    let mut lines = vec![format!("Product added with ID {}.", created.id)];
    lines.extend(list_products(db).await?);
    Ok(lines)
}

pub(crate) async fn delete_product(db: &DatabaseConnection, args: &[&str]) -> Result<Vec<String>> {
    let affected = product::delete_product(db, selection(args, 0, "Product ID")?).await?;
    let mut lines = vec![format!("{affected} product(s) deleted.")];
    lines.extend(list_products(db).await?);
    Ok(lines)
}

// ----- Orders -----

pub(crate) async fn order_choices(db: &DatabaseConnection) -> Result<Vec<String>> {
    let mut lines = vec!["Users:".to_string()];
    lines.extend(render(&order::user_choices(db).await?, "  (none)"));
    lines.push("Products:".to_string());
    lines.extend(render(&order::product_choices(db).await?, "  (none)"));
    Ok(lines)
}

pub(crate) fn show_draft(draft: &OrderDraft) -> Vec<String> {
    if draft.is_empty() {
        return vec!["(no staged lines)".to_string()];
    }
    draft
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{}. {line}", index + 1))
        .collect()
}

pub(crate) fn stage_line(draft: &mut OrderDraft, args: &[&str]) -> Result<Vec<String>> {
    let user_id = selection(args, 0, "User")?;
    let product_id = selection(args, 1, "Product")?;
    let line = draft.stage_line(user_id, product_id, field(args, 2))?;
    let mut lines = vec![format!("Staged: {line}")];
    lines.extend(show_draft(draft));
    Ok(lines)
}

pub(crate) fn remove_line(draft: &mut OrderDraft, args: &[&str]) -> Result<Vec<String>> {
    let position = parse_integer("Line", field(args, 0))?;
    let removed = draft.remove_line(usize::try_from(position).unwrap_or(0))?;
    let mut lines = vec![format!("Removed: {removed}")];
    lines.extend(show_draft(draft));
    Ok(lines)
}

pub(crate) async fn place_order(
    db: &DatabaseConnection,
    draft: &mut OrderDraft,
) -> Result<Vec<String>> {
    let placed = order::place_order(db, draft).await?;
    info!(count = placed.len(), "Order placed from terminal");
    let mut lines = vec![format!(
        "Order placed successfully! ({} line(s))",
        placed.len()
    )];
    lines.extend(placed.into_iter().map(|o| order::OrderRow(o).to_string()));
    Ok(lines)
}

pub(crate) async fn list_orders(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(render(&order::list_orders(db).await?, "(no orders)"))
}

// ----- Payments -----

pub(crate) async fn list_payments(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(render(&payment::list_payments(db).await?, "(no payments)"))
}

pub(crate) async fn record_payment(db: &DatabaseConnection, args: &[&str]) -> Result<Vec<String>> {
    payment::record_payment(db, field(args, 0), field(args, 1)).await?;
    let mut lines = vec!["Payment recorded successfully!".to_string()];
    lines.extend(list_payments(db).await?);
    Ok(lines)
}
