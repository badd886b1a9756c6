use std::collections::HashMap;

use once_cell::sync::Lazy;

static AIRPORTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Russia
        ("шереметьево", "UUEE"),
        ("домодедово", "UUDD"),
        ("внуково", "UUWW"),
        ("жуковский", "UUBW"),
        ("абакан", "UNAA"),
        ("анадырь", "UHMA"),
        ("анапа", "URKA"),
        ("апатиты", "ULMK"),
        ("архангельск", "ULAA"),
        ("астрахань", "URWA"),
        ("барнаул", "UNBB"),
        ("белгород", "UUOB"),
        ("березово", "USHB"),
        ("благовещенск", "UNEE"),
        ("брянск", "UUBP"),
        ("бугульма", "UWKB"),
        ("великий устюг", "ULWU"),
        ("великий новгород", "ULNN"),
        ("владикавказ", "URMO"),
        ("владивосток", "UHWW"),
        ("волгоград", "URWW"),
        ("вологда", "ULWW"),
        ("воронеж", "UUOO"),
        ("воркута", "UUYW"),
        ("геленджик", "URKG"),
        ("горно-алтайск", "UNBG"),
        ("грозный", "URMG"),
        ("екатеринбург", "USSS"),
        ("игарка", "UOII"),
        ("ижевск", "USHH"),
        ("иркутск", "UIII"),
        ("йошкар-ола", "UWKJ"),
        ("казань", "UWKD"),
        ("калининград", "UMKK"),
        ("калуга", "UUBC"),
        ("кемерово", "UNEE"),
        ("киров", "USKK"),
        ("кострома", "UUBA"),
        ("краснодар", "URKK"),
        ("красноярск", "UNKL"),
        ("курган", "USUU"),
        ("курск", "UUOK"),
        ("кызыл", "UNKY"),
        ("липецк", "UUOL"),
        ("магнитогорск", "USCM"),
        ("махачкала", "URML"),
        ("минеральные воды", "URMM"),
        ("мурманск", "ULMM"),
        ("надым", "USMN"),
        ("нальчик", "URMN"),
        ("нижневартовск", "USNN"),
        ("нижнекамск", "UWKN"),
        ("нижний новгород", "UWGG"),
        ("новокузнецк", "UNWW"),
        ("новосибирск", "UNCC"),
        ("новый уренгой", "USMU"),
        ("омск", "UNOO"),
        ("оренбург", "UWOO"),
        ("орск", "UWOR"),
        ("пенза", "UWPP"),
        ("пермь", "USPP"),
        ("петрозаводск", "ULPB"),
        ("петропавловск-камчатский", "UHPP"),
        ("псков", "ULOO"),
        ("ростов-на-дону", "URRR"),
        ("рязань", "UWDR"),
        ("самара", "UWWW"),
        ("пулково", "ULLI"),
        ("саранск", "UWPS"),
        ("саратов", "UWSS"),
        ("сочи", "URSS"),
        ("ставрополь", "URMT"),
        ("сургут", "USRR"),
        ("сыктывкар", "UUYY"),
        ("тамбов", "UUOT"),
        ("томск", "UNTT"),
        ("тюмень", "USTR"),
        ("ульяновск", "UWLL"),
        ("уфа", "UWUU"),
        ("хабаровск", "UHHH"),
        ("ханты-мансийск", "USHN"),
        ("чебоксары", "UWKS"),
        ("челябинск", "USCC"),
        ("череповец", "ULWC"),
        ("чита", "UITA"),
        ("южно-сахалинск", "UHSS"),
        ("якутск", "UEEE"),
        ("ярославль", "UUDL"),
        // Belarus
        ("минск", "UMMS"),
        ("минск-1", "UMMM"),
        ("брест", "UMBB"),
        ("витебск", "UMII"),
        ("гомель", "UMGG"),
        ("гродно", "UMMG"),
        ("могилев", "UMOO"),
    ])
});

/// ICAO code for an airport or city name (case-insensitive).
pub fn icao_by_name(name: &str) -> Option<&'static str> {
    AIRPORTS.get(name.trim().to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(icao_by_name("Шереметьево"), Some("UUEE"));
        assert_eq!(icao_by_name(" МИНСК "), Some("UMMS"));
        assert_eq!(icao_by_name("Атлантида"), None);
    }
}
