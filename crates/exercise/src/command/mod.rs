mod insert_planned;
mod insert_rep;

pub use insert_planned::InsertPlannedInput;
pub use insert_rep::InsertRepInput;

#[derive(Clone)]
pub struct Command(pub sqlx::SqlitePool);

fn check_quantity(quantity: f64) -> reptrack_shared::Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        reptrack_shared::invalid!("quantity must be a positive number, got {}", quantity);
    }

    Ok(())
}
