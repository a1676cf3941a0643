//! Room listing command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::RoomFilter;

pub async fn cmd_list_rooms(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let rooms = store.list_rooms(&RoomFilter::default()).await?;

    if rooms.is_empty() {
        println!("No rooms in the catalog.");
        println!();
        println!("Add the sample catalog with: impactlab seed");
        return Ok(());
    }

    println!("Rooms ({} total)", rooms.len());
    println!("{:-<78}", "");

    for room in rooms {
        let marker = if room.status.is_active() { "•" } else { "x" };
        println!(
            "{} {:<24} {:<16} {:>10} {:>8.2} {}/h",
            marker,
            room.name,
            room.room_type,
            room.capacity,
            room.price_per_hour,
            config.bookings.currency
        );
        println!("    {}", room.id);
    }

    Ok(())
}
