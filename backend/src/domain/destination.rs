//! Static travel destination catalogue.
//!
//! Destinations are compiled into the binary rather than stored in the
//! database, so lookups are deterministic for the lifetime of the process.

use serde::Serialize;

/// One advertised destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// Numeric identifier used in `/location/{id}`.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Image path under the static asset root.
    pub image: &'static str,
    /// Short description of what to see and do.
    pub details: &'static str,
}

const DESTINATIONS: [Destination; 20] = [
    Destination {
        id: 1,
        name: "Goa",
        image: "/static/images/locations/img4.jpg",
        details: "Beaches, water sports, nightlife, Portuguese heritage and seafood.",
    },
    Destination {
        id: 2,
        name: "Jaipur",
        image: "/static/images/locations/img7.jpg",
        details: "Amber Fort, City Palace, Hawa Mahal and colorful bazaars.",
    },
    Destination {
        id: 3,
        name: "Agra",
        image: "/static/images/locations/img1.jpg",
        details: "Taj Mahal, Agra Fort, Mughlai cuisine and marble crafts.",
    },
    Destination {
        id: 4,
        name: "Varanasi",
        image: "/static/images/locations/img3.jpg",
        details: "Ghats of the Ganges, evening aarti, ancient temples and spiritual experiences.",
    },
    Destination {
        id: 5,
        name: "Munnar (Kerala)",
        image: "/static/images/locations/img18.jpg",
        details: "Tea gardens, misty hills, Eravikulam NP and scenic trekking.",
    },
    Destination {
        id: 6,
        name: "Leh-Ladakh",
        image: "/static/images/locations/img19.jpg",
        details: "High-altitude lakes, monasteries, biking routes and dramatic landscapes.",
    },
    Destination {
        id: 7,
        name: "Rishikesh",
        image: "/static/images/locations/img12.jpg",
        details: "Yoga, white-water rafting, temples and riverside cafes.",
    },
    Destination {
        id: 8,
        name: "Shimla",
        image: "/static/images/locations/img21.jpg",
        details: "Colonial architecture, Mall Road, scenic mountain walks and pine forests.",
    },
    Destination {
        id: 9,
        name: "Darjeeling",
        image: "/static/images/locations/img22.jpg",
        details: "Toy train, tea gardens and views of Kanchenjunga.",
    },
    Destination {
        id: 10,
        name: "Udaipur",
        image: "/static/images/locations/img23.jpg",
        details: "City of Lakes, palaces, boat rides and romantic vistas.",
    },
    Destination {
        id: 11,
        name: "Hyderabad",
        image: "/static/images/locations/img14.jpg",
        details: "Charminar, Golconda Fort, biryani and pearls.",
    },
    Destination {
        id: 12,
        name: "Kolkata",
        image: "/static/images/locations/img30.jpg",
        details: "Cultural capital, colonial architecture, food and festivals.",
    },
    Destination {
        id: 13,
        name: "Mumbai",
        image: "/static/images/locations/img6.jpg",
        details: "Gateway of India, Marine Drive, Bollywood and seaside promenades.",
    },
    Destination {
        id: 14,
        name: "Pondicherry",
        image: "/static/images/locations/img17.jpg",
        details: "French Quarter, beaches, cafés and Auroville nearby.",
    },
    Destination {
        id: 15,
        name: "Hampi",
        image: "/static/images/locations/img25.jpg",
        details: "UNESCO ruins, boulder-strewn landscape and ancient temples.",
    },
    Destination {
        id: 16,
        name: "Khajuraho",
        image: "/static/images/locations/img26.jpg",
        details: "Famous for intricately carved temples and sculptures.",
    },
    Destination {
        id: 17,
        name: "Coorg",
        image: "/static/images/locations/img27.jpg",
        details: "Coffee plantations, waterfalls and misty hills.",
    },
    Destination {
        id: 18,
        name: "Andaman Islands",
        image: "/static/images/locations/img28.jpg",
        details: "Pristine beaches, scuba diving and Radhanagar beach.",
    },
    Destination {
        id: 19,
        name: "Gangtok (Sikkim)",
        image: "/static/images/locations/img29.jpg",
        details: "Monasteries, scenic mountain passes and Himalayan culture.",
    },
    Destination {
        id: 20,
        name: "Ooty",
        image: "/static/images/locations/img10.jpg",
        details: "Botanical gardens, Nilgiri toy train and pleasant climate.",
    },
];

/// Read-only view over the compiled-in destinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestinationCatalogue;

impl DestinationCatalogue {
    /// All destinations in presentation order.
    pub fn all(&self) -> &'static [Destination] {
        &DESTINATIONS
    }

    /// Look a destination up by identifier.
    ///
    /// # Examples
    /// ```
    /// use tripsync::domain::DestinationCatalogue;
    ///
    /// let catalogue = DestinationCatalogue;
    /// assert_eq!(catalogue.find(1).map(|d| d.name), Some("Goa"));
    /// assert!(catalogue.find(0).is_none());
    /// ```
    pub fn find(&self, id: u32) -> Option<&'static Destination> {
        DESTINATIONS.iter().find(|destination| destination.id == id)
    }
}
