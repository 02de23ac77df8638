//! Supported victim countries and industries for threat feed filtering

use edit_distance::edit_distance;

/// Country names accepted for `victimKey = Country`
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Andorra", "Angola", "Antigua and Barbuda",
    "Argentina", "Armenia", "Australia", "Austria", "Azerbaijan", "Bahamas", "Bahrain",
    "Bangladesh", "Barbados", "Belarus", "Belgium", "Belize", "Benin", "Bhutan", "Bolivia",
    "Bosnia and Herzegovina", "Botswana", "Brazil", "Brunei", "Bulgaria", "Burkina Faso",
    "Burundi", "Cambodia", "Cameroon", "Canada", "Cape Verde", "Central African Republic",
    "Chad", "Chile", "China", "Colombia", "Comoros", "Costa Rica", "Croatia", "Cuba",
    "Cyprus", "Czech Republic", "Democratic Republic of the Congo", "Denmark", "Djibouti",
    "Dominica", "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Equatorial Guinea",
    "Eritrea", "Estonia", "Eswatini", "Ethiopia", "Fiji", "Finland", "France", "Gabon",
    "Gambia", "Georgia", "Germany", "Ghana", "Greece", "Grenada", "Guatemala", "Guinea",
    "Guinea-Bissau", "Guyana", "Haiti", "Honduras", "Hong Kong", "Hungary", "Iceland",
    "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Ivory Coast",
    "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kiribati", "Kosovo", "Kuwait",
    "Kyrgyzstan", "Laos", "Latvia", "Lebanon", "Lesotho", "Liberia", "Libya",
    "Liechtenstein", "Lithuania", "Luxembourg", "Macau", "Madagascar", "Malawi", "Malaysia",
    "Maldives", "Mali", "Malta", "Marshall Islands", "Mauritania", "Mauritius", "Mexico",
    "Micronesia", "Moldova", "Monaco", "Mongolia", "Montenegro", "Morocco", "Mozambique",
    "Myanmar", "Namibia", "Nauru", "Nepal", "Netherlands", "New Zealand", "Nicaragua",
    "Niger", "Nigeria", "North Korea", "North Macedonia", "Norway", "Oman", "Pakistan",
    "Palau", "Palestine", "Panama", "Papua New Guinea", "Paraguay", "Peru", "Philippines",
    "Poland", "Portugal", "Puerto Rico", "Qatar", "Republic of the Congo", "Romania",
    "Russia", "Rwanda", "Saint Kitts and Nevis", "Saint Lucia",
    "Saint Vincent and the Grenadines", "Samoa", "San Marino", "Sao Tome and Principe",
    "Saudi Arabia", "Senegal", "Serbia", "Seychelles", "Sierra Leone", "Singapore",
    "Slovakia", "Slovenia", "Solomon Islands", "Somalia", "South Africa", "South Korea",
    "South Sudan", "Spain", "Sri Lanka", "Sudan", "Suriname", "Sweden", "Switzerland",
    "Syria", "Taiwan", "Tajikistan", "Tanzania", "Thailand", "Timor-Leste", "Togo", "Tonga",
    "Trinidad and Tobago", "Tunisia", "Turkey", "Turkmenistan", "Tuvalu", "UAE", "UK",
    "USA", "Uganda", "Ukraine", "United Arab Emirates", "United Kingdom", "United States",
    "Uruguay", "Uzbekistan", "Vanuatu", "Vatican City", "Venezuela", "Vietnam", "Yemen",
    "Zambia", "Zimbabwe",
];

/// Industry names accepted for `victimKey = Industry`
pub const SUPPORTED_INDUSTRIES: &[&str] = &[
    "Agriculture & Farming",
    "Automotive",
    "Aviation & Aerospace",
    "Banking & Finance",
    "Construction & Engineering",
    "Consumer Services",
    "Cryptocurrency",
    "Defense & Military",
    "Education",
    "Energy & Utilities",
    "Entertainment & Media",
    "Financial Services",
    "Food & Beverages",
    "Gaming",
    "Government & Public Sector",
    "Healthcare & Pharmaceuticals",
    "Hospitality & Tourism",
    "Information Technology",
    "Insurance",
    "Legal Services",
    "Logistics & Transportation",
    "Manufacturing",
    "Maritime & Shipping",
    "Mining & Metals",
    "Non-Profit Organizations",
    "Oil & Gas",
    "Real Estate",
    "Religious Institutions",
    "Retail & E-commerce",
    "Telecommunications",
];

pub fn is_valid_country(value: &str) -> bool {
    SUPPORTED_COUNTRIES.contains(&value)
}

pub fn is_valid_industry(value: &str) -> bool {
    SUPPORTED_INDUSTRIES.contains(&value)
}

/// Closest supported name by case-insensitive edit distance, if reasonably close
pub fn closest_match<'a>(value: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let threshold = (needle.chars().count() / 3).max(2);

    candidates
        .iter()
        .map(|candidate| (edit_distance(&needle, &candidate.to_lowercase()), *candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

pub fn country_validation_message(value: &str) -> String {
    match closest_match(value, SUPPORTED_COUNTRIES) {
        Some(suggestion) => format!(
            "Invalid country name: \"{}\". Did you mean \"{}\"? Must be one of the supported countries.",
            value, suggestion
        ),
        None => format!(
            "Invalid country name: \"{}\". Must be one of the supported countries.",
            value
        ),
    }
}

pub fn industry_validation_message(value: &str) -> String {
    let valid = SUPPORTED_INDUSTRIES.join(", ");
    match closest_match(value, SUPPORTED_INDUSTRIES) {
        Some(suggestion) => format!(
            "Invalid industry name: \"{}\". Did you mean \"{}\"? Valid industries: {}",
            value, suggestion, valid
        ),
        None => format!(
            "Invalid industry name: \"{}\". Valid industries: {}",
            value, valid
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        assert!(is_valid_country("Germany"));
        assert!(is_valid_country("United States"));
        assert!(!is_valid_country("Atlantis"));
        assert!(!is_valid_country("germany"));

        assert!(is_valid_industry("Healthcare & Pharmaceuticals"));
        assert!(!is_valid_industry("Healthcare"));
    }

    #[test]
    fn test_closest_match() {
        assert_eq!(closest_match("germany", SUPPORTED_COUNTRIES), Some("Germany"));
        assert_eq!(closest_match("Frnace", SUPPORTED_COUNTRIES), Some("France"));
        assert_eq!(closest_match("Atlantis", SUPPORTED_COUNTRIES), None);
        assert_eq!(closest_match("", SUPPORTED_COUNTRIES), None);
        assert_eq!(
            closest_match("telecommunication", SUPPORTED_INDUSTRIES),
            Some("Telecommunications")
        );
    }

    #[test]
    fn test_messages() {
        let message = country_validation_message("germany");
        assert!(message.contains("Did you mean \"Germany\""));

        let message = industry_validation_message("Underwater Basket Weaving");
        assert!(message.contains("Valid industries:"));
        assert!(message.contains("Financial Services"));
    }
}
