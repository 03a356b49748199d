//! English/Hindi string tables

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    pub fn parse(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Name of the language in itself, for the switcher
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Hi => HI,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// String for `key`, falling back to English, then to the key itself
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language.table(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

static EN: &[(&str, &str)] = &[
    // Navigation
    ("dashboard", "Dashboard"),
    ("donations", "Donations"),
    ("collections", "Collections"),
    ("expenses", "Expenses"),
    ("flats", "Flats"),
    ("fixed_expenses", "Fixed Expenses"),
    ("temple_society", "Temple Society"),
    ("coming_soon", "Coming Soon"),
    ("coming_soon_subtitle", "This section is under development"),
    // Common
    ("add", "Add"),
    ("edit", "Edit"),
    ("delete", "Delete"),
    ("save", "Save"),
    ("update", "Update"),
    ("cancel", "Cancel"),
    ("search", "Search"),
    ("actions", "Actions"),
    ("date", "Date"),
    ("amount", "Amount"),
    ("total", "Total"),
    ("view", "View"),
    ("language", "Language"),
    ("logout", "Logout"),
    ("loading", "Loading..."),
    ("no_records", "No records yet"),
    // Login
    ("login", "Login"),
    ("username", "Username"),
    ("password", "Password"),
    ("signin", "Sign In"),
    ("welcome", "Welcome to Temple Management"),
    ("login_subtitle", "Please sign in to continue"),
    // Dashboard
    ("total_donations", "Total Donations"),
    ("total_collections", "Total Collections"),
    ("total_expenses", "Total Expenses"),
    ("net_balance", "Net Balance"),
    ("monthly_donations", "Monthly Donations"),
    ("monthly_collections", "Monthly Collections"),
    ("monthly_expenses", "Monthly Expenses"),
    ("active_flats", "Active Flats"),
    ("recent_transactions", "Recent Transactions"),
    ("recent_donations", "Recent Donations"),
    ("recent_expenses", "Recent Expenses"),
    // Donations
    ("add_donation", "Add Donation"),
    ("donor_name", "Donor Name"),
    ("purpose", "Purpose"),
    ("payment_method", "Payment Method"),
    ("flat_number", "Flat Number"),
    ("phone", "Phone"),
    ("email", "Email"),
    ("notes", "Notes"),
    ("select_flat", "Select Flat"),
    ("cash", "Cash"),
    ("online", "Online"),
    ("cheque", "Cheque"),
    // Collections
    ("add_collection", "Add Collection"),
    ("collected_by", "Collected By"),
    // Expenses
    ("add_expense", "Add Expense"),
    ("description", "Description"),
    ("approved_by", "Approved By"),
    ("vendor", "Vendor"),
    ("receipt", "Receipt"),
    // Flats
    ("add_flat", "Add Flat"),
    ("flat_number_label", "Flat Number"),
    ("owner_name", "Owner Name"),
    ("membership_fee", "Membership Fee"),
    ("last_payment", "Last Payment"),
    ("status", "Status"),
    ("active", "Active"),
    ("inactive", "Inactive"),
    ("pending", "Pending"),
    // Fixed Expenses
    ("add_fixed_expense", "Add Fixed Expense"),
    ("title", "Title"),
    ("frequency", "Frequency"),
    ("category", "Category"),
    ("start_date", "Start Date"),
    ("end_date", "End Date"),
    ("is_active", "Active"),
    ("monthly", "Monthly"),
    ("quarterly", "Quarterly"),
    ("yearly", "Yearly"),
    // Date Filter
    ("filter_by_date", "Filter by Date"),
    ("from_date", "From Date"),
    ("to_date", "To Date"),
    ("apply_filter", "Apply Filter"),
    ("clear_filter", "Clear Filter"),
];

static HI: &[(&str, &str)] = &[
    // Navigation
    ("dashboard", "डैशबोर्ड"),
    ("donations", "दान"),
    ("collections", "संग्रह"),
    ("expenses", "व्यय"),
    ("flats", "फ्लैट"),
    ("fixed_expenses", "निश्चित व्यय"),
    ("temple_society", "मंदिर समिति"),
    ("coming_soon", "जल्द आ रहा है"),
    // Common
    ("add", "जोड़ें"),
    ("edit", "संपादित करें"),
    ("delete", "हटाएं"),
    ("save", "सेव करें"),
    ("cancel", "रद्द करें"),
    ("search", "खोजें"),
    ("actions", "कार्य"),
    ("date", "दिनांक"),
    ("amount", "राशि"),
    ("total", "कुल"),
    ("view", "देखें"),
    ("language", "भाषा"),
    ("logout", "लॉगआउट"),
    // Login
    ("login", "लॉगिन"),
    ("username", "उपयोगकर्ता नाम"),
    ("password", "पासवर्ड"),
    ("signin", "साइन इन"),
    ("welcome", "मंदिर प्रबंधन में आपका स्वागत है"),
    ("login_subtitle", "कृपया जारी रखने के लिए साइन इन करें"),
    // Dashboard
    ("total_donations", "कुल दान"),
    ("total_collections", "कुल संग्रह"),
    ("total_expenses", "कुल व्यय"),
    ("net_balance", "शुद्ध बैलेंस"),
    ("monthly_donations", "मासिक दान"),
    ("monthly_collections", "मासिक संग्रह"),
    ("monthly_expenses", "मासिक व्यय"),
    ("active_flats", "सक्रिय फ्लैट"),
    ("recent_transactions", "हाल के लेन-देन"),
    // Donations
    ("add_donation", "दान जोड़ें"),
    ("donor_name", "दाता का नाम"),
    ("purpose", "उद्देश्य"),
    ("payment_method", "भुगतान विधि"),
    ("flat_number", "फ्लैट नंबर"),
    ("phone", "फोन"),
    ("email", "ईमेल"),
    ("notes", "टिप्पणी"),
    ("select_flat", "फ्लैट चुनें"),
    ("cash", "नकद"),
    ("online", "ऑनलाइन"),
    ("cheque", "चेक"),
    // Flats
    ("add_flat", "फ्लैट जोड़ें"),
    ("flat_number_label", "फ्लैट नंबर"),
    ("owner_name", "मालिक का नाम"),
    ("membership_fee", "सदस्यता शुल्क"),
    ("last_payment", "अंतिम भुगतान"),
    ("status", "स्थिति"),
    ("active", "सक्रिय"),
    ("inactive", "निष्क्रिय"),
    ("pending", "लंबित"),
    // Fixed Expenses
    ("add_fixed_expense", "निश्चित व्यय जोड़ें"),
    ("title", "शीर्षक"),
    ("frequency", "आवृत्ति"),
    ("category", "श्रेणी"),
    ("start_date", "प्रारंभ दिनांक"),
    ("end_date", "समाप्ति दिनांक"),
    ("monthly", "मासिक"),
    ("quarterly", "त्रैमासिक"),
    ("yearly", "वार्षिक"),
    // Date Filter
    ("filter_by_date", "दिनांक के अनुसार फ़िल्टर करें"),
    ("from_date", "से दिनांक"),
    ("to_date", "तक दिनांक"),
    ("apply_filter", "फ़िल्टर लागू करें"),
    ("clear_filter", "फ़िल्टर साफ़ करें"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_translate() {
        assert_eq!(translate(Language::En, "donations"), "Donations");
        assert_eq!(translate(Language::Hi, "donations"), "दान");
    }

    #[test]
    fn test_fallback_chain() {
        // Hindi table has no entry, English does
        assert_eq!(translate(Language::Hi, "add_collection"), "Add Collection");
        assert_eq!(translate(Language::Hi, "no_such_key"), "no_such_key");
        assert_eq!(translate(Language::En, ""), "");
    }

    #[test]
    fn test_hindi_keys_exist_in_english() {
        let en: HashSet<_> = EN.iter().map(|(k, _)| *k).collect();
        for (key, _) in HI {
            assert!(en.contains(key), "{} missing from English table", key);
        }
        assert_eq!(en.len(), EN.len(), "duplicate English key");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::parse("hi"), Some(Language::Hi));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::default().code(), "en");
    }
}
