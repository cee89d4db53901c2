//! Static crisis-resource lookup table and formatter.
//!
//! Fixed at compile time and never mutated; const slices keep the
//! declaration order, which is the order the lines are rendered in.

/// Country used when the caller does not specify one.
pub const HOME_COUNTRY: &str = "Singapore";

const SINGAPORE_RESOURCES: &[(&str, &str)] = &[
    ("Samaritans of Singapore (SOS)", "1767"),
    ("Link to SOS", "https://www.sos.org.sg"),
    ("Institute of Mental Health (IMH)", "6389 2222"),
    ("Link to IMH", "https://www.imh.com.sg/Pages/default.aspx"),
    (
        "Singapore Association for Mental Health (SAMH)",
        "1800 283 7019",
    ),
    ("Link to SAMH", "https://www.samhealth.org.sg"),
];

/// Non-region-specific resources, appended to every response.
const GENERAL_RESOURCES: &[(&str, &str)] = &[
    (
        "International Suicide Prevention",
        "https://www.iasp.info/resources/Crisis_Centres/",
    ),
    ("Crisis Text Line", "Text HOME to 741741"),
    ("Find a Helpline", "https://findahelpline.com/"),
];

const LOCAL_RESOURCES: &[(&str, &[(&str, &str)])] = &[("Singapore", SINGAPORE_RESOURCES)];

fn local_resources_for(country: &str) -> Option<&'static [(&'static str, &'static str)]> {
    LOCAL_RESOURCES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, entries)| *entries)
}

/// Format the resource listing for a country. An unknown country simply
/// omits the local section; the general section is always present.
pub fn format_resources(country: &str) -> String {
    let mut text = String::from("Here are some resources that might help!\n\n");

    if let Some(entries) = local_resources_for(country) {
        text.push_str(&format!("Local resources for {}:\n", country));
        for (name, contact) in entries {
            text.push_str(&format!("{}: {}\n", name, contact));
        }
        text.push('\n');
    }

    text.push_str("International resources:\n");
    for (name, contact) in GENERAL_RESOURCES {
        text.push_str(&format!("{}: {}\n", name, contact));
    }

    text
}
