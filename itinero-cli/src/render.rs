use itinero_core::{HotelListing, ItineraryView, PlanTrip, Route};
use std::fmt::Write;

/// Destination section of the form screen: weather, review and map position.
pub fn destination_details(form: &PlanTrip) -> String {
    let mut out = String::new();

    if let Some(weather) = form.weather_line() {
        let _ = writeln!(out, "\nDestination Details");
        let _ = writeln!(out, "{weather}");
        let _ = writeln!(out, "{}", form.review());
    }

    let _ = writeln!(out, "\nDestination Map");
    let _ = writeln!(out, "{}", form.map_line());
    out
}

pub fn itinerary(view: &ItineraryView, pdf_url: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Your Trip Itinerary\n");
    let _ = writeln!(out, "{}", view.destination());
    let _ = writeln!(out, "  Budget:      {}", view.budget());
    let _ = writeln!(out, "  Trip Type:   {}", view.trip_type());
    let _ = writeln!(out, "  Preferences: {}", view.preferences());

    let _ = writeln!(out, "\nRecommended Hotels in {}", view.destination());
    let hotels = view.hotels();
    if hotels.all().is_empty() {
        let _ = writeln!(out, "  No hotels found.");
    }
    for hotel in hotels.featured() {
        hotel_line(&mut out, hotel);
    }
    if hotels.is_expanded() && !hotels.more().is_empty() {
        let _ = writeln!(out, "\n  More Hotels");
        for hotel in hotels.more() {
            hotel_line(&mut out, hotel);
        }
    }
    if let Some(label) = hotels.toggle_label() {
        let hint = if hotels.is_expanded() {
            "rerun without --all-hotels".to_string()
        } else {
            format!("{} more, rerun with --all-hotels", hotels.overflow().len())
        };
        let _ = writeln!(out, "  [{label}] ({hint})");
    }

    let _ = writeln!(out, "\nGenerated Itinerary");
    match view.itinerary_notice() {
        Some(notice) => {
            let _ = writeln!(out, "  {notice}");
        }
        None => {
            for day in view.segments() {
                let _ = writeln!(out, "\n  {}", day.day);
                for (i, step) in day.steps().iter().enumerate() {
                    let _ = writeln!(out, "    {}. {step}", i + 1);
                }
            }
        }
    }

    let _ = writeln!(out);
    if let Some(url) = pdf_url {
        let _ = writeln!(out, "Download Itinerary PDF: {url}");
    }
    let command = match view.generate_new().route() {
        Route::PlanTrip => "itinero plan",
        Route::Itinerary => "itinero show",
    };
    let _ = writeln!(out, "Generate New Itinerary: run `{command}`");

    out
}

fn hotel_line(out: &mut String, hotel: &HotelListing) {
    let _ = writeln!(out, "  - {} ({})  ⭐ {:.1}/5", hotel.name, hotel.address, hotel.rating);
}
