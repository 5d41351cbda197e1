//! Static page content: brand eras, the model lineup with spec sheets,
//! racing statistics, hero copy, and the navigation order.

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Era {
    pub id: String,
    pub years: String,
    pub title: String,
    pub description: String,
    pub quote: String,
    pub author: String,
    pub background: String,
    pub car_image: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpecSheet {
    pub engine: String,
    pub power: String,
    pub torque: String,
    pub acceleration: String,
    pub top_speed: String,
    pub weight: String,
    pub transmission: String,
    pub price: String,
}

impl SpecSheet {
    /// Rows in display order, as shown in the spec modal.
    pub fn rows(&self) -> [(&'static str, &str); 8] {
        [
            ("Engine", &self.engine),
            ("Power", &self.power),
            ("Torque", &self.torque),
            ("0-60 mph", &self.acceleration),
            ("Top Speed", &self.top_speed),
            ("Weight", &self.weight),
            ("Transmission", &self.transmission),
            ("Price", &self.price),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CarModel {
    pub id: String,
    pub name: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub specs: SpecSheet,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u32,
}

/// A hero text block, positioned at a fraction of the hero section's height.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeroBlock {
    pub title: String,
    pub tagline: String,
    pub at: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavEntry {
    pub section: String,
    pub label: String,
}

pub fn eras() -> Vec<Era> {
    vec![
        Era {
            id: "origins".to_string(),
            years: "1968 - 1984".to_string(),
            title: "Forged on the Hillclimb".to_string(),
            description: "Founded by Dario Aurion in a two-bay workshop above Lake Orta. \
                          Tube frames, open exhausts, and a refusal to finish second."
                .to_string(),
            quote: "A car is honest. It gives back exactly what you put into it.".to_string(),
            author: "Dario Aurion".to_string(),
            background: "images/aurion_origins_workshop.png".to_string(),
            car_image: "images/aurion_barchetta_side.png".to_string(),
        },
        Era {
            id: "apex".to_string(),
            years: "1985 - 2008".to_string(),
            title: "The Apex Years".to_string(),
            description: "Wind tunnels and telemetry meet hand-formed aluminium. The SV \
                          programme takes the brand from the paddock to the poster."
                .to_string(),
            quote: "We measured everything, then trusted the driver anyway.".to_string(),
            author: "Lena Castelli, Chief Engineer".to_string(),
            background: "images/aurion_apex_windtunnel.png".to_string(),
            car_image: "images/aurion_sv8_side.png".to_string(),
        },
        Era {
            id: "modern".to_string(),
            years: "2009 - Present".to_string(),
            title: "Carbon and Current".to_string(),
            description: "A monocoque lighter than its own fuel load. Hybrid torque fill \
                          with no lag and no apology. The quiet before the apex."
                .to_string(),
            quote: "The future should be faster, not louder.".to_string(),
            author: "Aurion Design Studio".to_string(),
            background: "images/aurion_modern_studio.png".to_string(),
            car_image: "images/aurion_vela_side.png".to_string(),
        },
    ]
}

pub fn models() -> Vec<CarModel> {
    vec![
        CarModel {
            id: "sv8".to_string(),
            name: "Aurion SV-8".to_string(),
            year: "1994".to_string(),
            description: "The definitive analogue supercar. A gated six-speed, an unassisted \
                          rack, and a redline that arrives like a verdict."
                .to_string(),
            image: "images/aurion_sv8_studio.png".to_string(),
            specs: SpecSheet {
                engine: "4.0L naturally aspirated V8".to_string(),
                power: "520 hp @ 8,250 rpm".to_string(),
                torque: "350 lb-ft @ 6,000 rpm".to_string(),
                acceleration: "3.9 s".to_string(),
                top_speed: "198 mph".to_string(),
                weight: "1,180 kg".to_string(),
                transmission: "6-speed manual".to_string(),
                price: "Auction only".to_string(),
            },
        },
        CarModel {
            id: "tempesta".to_string(),
            name: "Aurion Tempesta".to_string(),
            year: "2016".to_string(),
            description: "Twin turbochargers tucked inside the vee, active aero on every \
                          surface that could carry it. The record car of its decade."
                .to_string(),
            image: "images/aurion_tempesta_studio.png".to_string(),
            specs: SpecSheet {
                engine: "3.9L twin-turbo V8".to_string(),
                power: "710 hp @ 8,000 rpm".to_string(),
                torque: "568 lb-ft @ 3,000 rpm".to_string(),
                acceleration: "2.9 s".to_string(),
                top_speed: "211 mph".to_string(),
                weight: "1,395 kg".to_string(),
                transmission: "7-speed dual-clutch".to_string(),
                price: "From $248,000".to_string(),
            },
        },
        CarModel {
            id: "vela".to_string(),
            name: "Aurion Vela GT".to_string(),
            year: "2025".to_string(),
            description: "A carbon tub, a hybrid axle, and a silhouette drawn by the wind \
                          tunnel. The lightest Aurion since the hillclimb cars."
                .to_string(),
            image: "images/aurion_vela_studio.png".to_string(),
            specs: SpecSheet {
                engine: "3.0L twin-turbo V6 hybrid".to_string(),
                power: "745 hp combined".to_string(),
                torque: "590 lb-ft combined".to_string(),
                acceleration: "2.6 s".to_string(),
                top_speed: "205 mph".to_string(),
                weight: "1,310 kg".to_string(),
                transmission: "8-speed dual-clutch".to_string(),
                price: "From $312,000".to_string(),
            },
        },
    ]
}

pub fn stats() -> Vec<Stat> {
    vec![
        Stat {
            label: "Race Victories".to_string(),
            value: 187,
        },
        Stat {
            label: "Drivers' Championships".to_string(),
            value: 9,
        },
        Stat {
            label: "Constructors' Championships".to_string(),
            value: 7,
        },
    ]
}

pub fn hero_blocks() -> Vec<HeroBlock> {
    vec![
        HeroBlock {
            title: "Aerodynamics".to_string(),
            tagline: "Drawn by the wind".to_string(),
            at: 0.35,
        },
        HeroBlock {
            title: "Precision".to_string(),
            tagline: "Measured in microns".to_string(),
            at: 0.65,
        },
        HeroBlock {
            title: "Pure Power".to_string(),
            tagline: "Held in reserve".to_string(),
            at: 0.95,
        },
    ]
}

pub fn nav_entries() -> Vec<NavEntry> {
    vec![
        NavEntry {
            section: "hero".to_string(),
            label: "Home".to_string(),
        },
        NavEntry {
            section: "history".to_string(),
            label: "Heritage".to_string(),
        },
        NavEntry {
            section: "racing".to_string(),
            label: "Racing".to_string(),
        },
        NavEntry {
            section: "models".to_string(),
            label: "Models".to_string(),
        },
    ]
}
