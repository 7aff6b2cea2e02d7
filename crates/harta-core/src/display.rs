use crate::{Building, Listing, SearchKind, SearchResults};
use colored::Colorize;
use tabled::settings::{object::Columns, Modify, Style, Width};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct ListingTableRow {
    #[tabled(rename = "Price", display_with = "display_right_14")]
    pub price: String,
    #[tabled(rename = "Area", display_with = "display_right_8")]
    pub area: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

#[derive(Tabled)]
struct BuildingTableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cartier")]
    cartier: String,
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn display_right_14(s: &str) -> String {
    format!("{:>14}", s)
}

fn display_right_8(s: &str) -> String {
    format!("{:>8}", s)
}

impl From<&Listing> for ListingTableRow {
    fn from(listing: &Listing) -> Self {
        Self {
            price: listing.price.clone(),
            area: listing.area.clone(),
            location: listing.location.clone(),
            url: listing.url.clone(),
        }
    }
}

pub fn create_listing_table(listings: &[Listing]) -> String {
    let rows: Vec<ListingTableRow> = listings.iter().map(ListingTableRow::from).collect();

    let mut table = Table::new(&rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::single(0)).with(Width::truncate(14)))
        .with(Modify::new(Columns::single(1)).with(Width::truncate(8)))
        .with(Modify::new(Columns::single(2)).with(Width::wrap(40)))
        .with(Modify::new(Columns::single(3)).with(Width::wrap(80)));

    table.to_string()
}

pub fn create_building_table(buildings: &[Building]) -> String {
    let rows: Vec<BuildingTableRow> = buildings
        .iter()
        .map(|b| BuildingTableRow {
            name: b.name.clone(),
            cartier: b.cartier.clone(),
            district: b.district.clone(),
            city: b.city.clone(),
            address: b.address.clone(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::single(4)).with(Width::wrap(60)));

    table.to_string()
}

/// Both sides of a search, one table each, with the error line if any side failed.
pub fn format_results(name: &str, results: &SearchResults) -> String {
    let mut out = format!(
        "{} ({})\n",
        name.bold(),
        results.fetched_at.format("%Y-%m-%d %H:%M UTC")
    );

    for (kind, title) in [(SearchKind::Sale, "Vânzare"), (SearchKind::Rent, "Închiriere")] {
        let listings = results.listings(kind);
        out.push_str(&format!("\n{} - {} listings\n", title.bold(), listings.len()));
        if listings.is_empty() {
            out.push_str("No listings found\n");
        } else {
            out.push_str(&create_listing_table(listings));
            out.push('\n');
        }
    }

    if let Some(error) = &results.error {
        out.push_str(&format!("\n{} {}\n", "error:".red(), error));
    }

    out
}
