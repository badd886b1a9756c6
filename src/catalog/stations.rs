use std::collections::HashMap;

use once_cell::sync::Lazy;

static REGIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("адыгея республика", "republic-adygea"),
        ("алтай республика", "republic-altai"),
        ("алтайский край", "territory-altai"),
        ("амурская область", "amur-area"),
        ("архангельская область", "arkhangelsk-area"),
        ("астраханская область", "astrakhan-area"),
        ("башкортостан республика", "republic-bashkortostan"),
        ("белгородская область", "belgorod-area"),
        ("брянская область", "bryansk-area"),
        ("бурятия республика", "republic-buryatia"),
        ("владимирская область", "vladimir-area"),
        ("волгоградская область", "volgograd-area"),
        ("вологодская область", "vologda-area"),
        ("воронежская область", "voronezh-area"),
        ("дагестан республика", "republic-dagestan"),
        ("донецкая народная республика", "republic-donetsk"),
        ("еврейская автономная область", "evr-avt-obl"),
        ("забайкальский край", "territory-zabaykalsky"),
        ("запорожская область", "zaporizhzhia-area"),
        ("ивановская область", "ivanovo-area"),
        ("ингушетия республика", "republic-ingushetia"),
        ("иркутская область", "irkutsk-area"),
        ("кабардино-балкария республика", "republic-kabardino-balkaria"),
        ("калининградская область", "kaliningrad-area"),
        ("калмыкия республика", "republic-kalmykia"),
        ("калужская область", "kaluga-area"),
        ("камчатский край", "territory-kamchatka"),
        ("карачаево-черкесия", "republic-karachay-cherkessia"),
        ("карелия республика", "republic-karelia"),
        ("кемеровская область", "kemerovo-area"),
        ("кировская область", "kirov-area"),
        ("коми республика", "republic-komi"),
        ("костромская область", "kostroma-area"),
        ("краснодарский край", "krasnodar-territory"),
        ("красноярский край", "territory-krasnoyarsk"),
        ("крым республика", "republic-crimea"),
        ("курганская область", "kurgan-area"),
        ("курская область", "kursk-area"),
        ("ленинградская область", "leningrad-region"),
        ("липецкая область", "lipetsk-area"),
        ("луганская народная республика", "republic-lugansk"),
        ("магаданская область", "magadan-area"),
        ("марий эл республика", "republic-mari-el"),
        ("мордовия республика", "republic-mordovia"),
        ("московская область", "moscow-area"),
        ("мурманская область", "murmansk-area"),
        ("ненецкий автономный округ", "autonomous-area-nenets"),
        ("нижегородская область", "nizhny-novgorod-area"),
        ("новгородская область", "novgorod-area"),
        ("новосибирская область", "novosibirsk-area"),
        ("омская область", "omsk-area"),
        ("оренбургская область", "orenburg-area"),
        ("орловская область", "oryol-area"),
        ("пензенская область", "penza-area"),
        ("пермский край", "territory-perm"),
        ("приморский край", "territory-primorsky"),
        ("псковская область", "pskov-area"),
        ("ростовская область", "rostov-area"),
        ("рязанская область", "ryazan-area"),
        ("самарская область", "samara-area"),
        ("саратовская область", "saratov-area"),
        ("саха(якутия) республика", "republic-sakha-yakutia"),
        ("сахалинская область", "sakhalin-area"),
        ("свердловская область", "sverdlovsk-area"),
        ("северная осетия-алания республика", "republic-north-ossetia-alania"),
        ("смоленская область", "smolensk-area"),
        ("ставропольский край", "territory-stavropol"),
        ("тамбовская область", "tambov-area"),
        ("татарстан республика", "republic-tatarstan"),
        ("тверская область", "tver-area"),
        ("томская область", "tomsk-area"),
        ("тульская область", "tula-area"),
        ("тыва республика", "republic-tyva"),
        ("тюменская область", "tyumen-area"),
        ("удмуртия республика", "republic-udmurtia"),
        ("ульяновская область", "ulyanovsk-area"),
        ("хабаровский край", "territory-khabarovsk"),
        ("хакасия республика", "republic-khakassia"),
        ("ханты-мансийский автономный округ", "autonomous-area-khanty-mansi"),
        ("херсонская область", "kherson-region"),
        ("челябинская область", "chelyabinsk-area"),
        ("чеченская республика", "republic-chechen"),
        ("чувашская республика", "republic-chuvash"),
        ("чукотский автономный округ", "autonomous-area-chukotka"),
        ("ямало-ненецкий ао", "autonomous-area-yamalo-nenets"),
        ("ярославская область", "yaroslavl-area"),
    ])
});

static STATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("клин", "klin"),
        ("москва", "moscow"),
        ("калуга", "kaluga-A"),
        ("тверь", "tver"),
        ("быково", "bykovo"),
        ("внуково", "vnukovo"),
        ("волоколамск", "volokolamsk"),
        ("дмитров", "dmitrov"),
        ("домодедово", "domodedovo"),
        ("егорьевск", "egorevsk"),
        ("кашира", "kashira"),
        ("коломна", "kolomna"),
        ("можайск", "mozhaysk"),
        ("москва вднх", "moscow"),
        ("москва балчуг", "moskva-balchug"),
        ("наро-фоминск", "naro-fominsk"),
        ("немчиновка", "nemchinovka"),
        ("ново-иерусалим", "novo-jerusalim"),
        ("орехово-зуево", "orekhovo-zuevo"),
        ("павловский посад", "pavlovsky-posad"),
        ("павловское", "pavlovskoe"),
        ("сергиев посад", "sergiev-posad"),
        ("серпухов", "serpukhov"),
        ("третьяково", "tretyakovo"),
        ("черусти", "cherusti"),
        ("шереметьево", "sheremetyevo"),
        ("железногорск", "zheleznogorsk"),
        ("курск", "kursk"),
        ("курчатов", "kurchatov"),
        ("обоянь", "oboyan"),
        ("поныри", "ponyri"),
        ("рыльск", "rylsk"),
        ("тим", "tim"),
        ("майкоп", "majkop"),
        ("горно-алтайск", "gorno-altaysk"),
        ("барнаул", "barnaul"),
        ("благовещенск", "blagoveshchensk"),
        ("архангельск", "arkhangelsk"),
        ("астрахань", "astrakhan"),
        ("уфа", "ufa"),
        ("белгород", "belgorod"),
        ("брянск", "bryansk"),
        ("улан-удэ", "ulan-ude"),
        ("владимир", "vladimir"),
        ("волгоград", "volgograd"),
        ("вологда", "vologda"),
        ("воронеж", "voronezh_1"),
        ("махачкала", "makhachkala"),
        ("донецк", "donetsk"),
        ("биробиджан", "birobidzhan"),
        ("чита", "chita"),
        ("бердянск", "berdyansk"),
        ("иваново", "ivanovo"),
        ("назарян", "nazran"),
        ("иркутск", "irkutsk"),
        ("нальчик", "nalchik"),
        ("калининград", "kaliningrad"),
        ("элиста", "elista"),
        ("петропавловск", "petropavlovsk"),
        ("черкесск", "cherkessk"),
        ("петрозаводск", "petrozavodsk"),
        ("кемерово", "kemerovo"),
        ("киров", "kirov"),
        ("сыктывкар", "syktyvkar"),
        ("кострома", "kostroma"),
        ("краснодар", "krasnodar"),
        ("красноярск", "krasnoyarsk"),
        ("симферополь", "simferopol"),
        ("курган", "kurgan"),
        ("липецк", "lipetsk"),
        ("луганск", "luhansk"),
        ("магадан", "magadan"),
        ("йошкар-ола", "joskar-ola"),
        ("саранск", "saransk"),
        ("мурманск", "murmansk"),
        ("нарьян-мар", "naryan-mar"),
        ("нижний новгород", "nizhny-novgorod"),
        ("новгород", "novgorod"),
        ("новосибирск", "novosibirsk"),
        ("омск", "omsk"),
        ("оренбург", "orenburg"),
        ("орёл", "orel"),
        ("пенза", "penza"),
        ("пермь", "perm"),
        ("владивосток", "vladivostok"),
        ("псков", "pskov"),
        ("ростов-на-дону", "rostov-na-donu"),
        ("рязань", "ryazan"),
        ("самара", "samara"),
        ("саратов", "saratov"),
        ("якутск", "yakutsk"),
        ("южно-сахалинск", "yuzhno-sakhalinsk"),
        ("екатеринбург", "ekaterinburg"),
        ("владикавказ", "vladikavkaz"),
        ("смоленск", "smolensk"),
        ("ставрополь", "stavropol"),
        ("тамбов", "tambov"),
        ("казань", "kazan"),
        ("абакан", "abakan"),
        ("тюмень", "tyumen"),
        ("ижевск", "izhevsk"),
        ("ульяновск", "ulyanovsk"),
        ("хабаровск", "khabarovsk"),
        ("грозный", "grozny"),
        ("чебоксары", "cheboksary"),
        ("анадырь", "anadyr"),
        ("салехард", "salehard"),
        ("вязьма", "vyazma"),
        ("гагарин", "gagarin"),
        ("рославль", "roslavl"),
        ("жердевка", "zerdevka"),
        ("кирсанов", "kirsanov"),
        ("мичуринск", "michurinsk"),
        ("моршанск", "morshansk"),
        ("обловка", "oblovka"),
        ("совхоз им.ленина", "sovkhoz_im_len"),
        ("тамбов амсг", "tambov"),
        ("анапа", "anapa"),
        ("армавир", "armavir"),
        ("белая глина", "belaya_glina"),
        ("геленджик", "gelendzhik"),
        ("горячий ключ", "goryachiy_klyuch"),
        ("джубга", "dzhubga"),
        ("должанская", "dolzhanskaya"),
        ("ейск", "eysk"),
        ("каневская", "kanevskaya"),
        ("красная поляна", "krasnaya_polyana"),
        ("кропоткин", "kropotkin"),
        ("крымск", "krymsk"),
        ("кубанская", "kubanskaya"),
        ("кущевская", "kushchevskaya"),
        ("новороссийск", "novorossiysk"),
        ("приморско-ахтарск", "primorsko_akhtarsk"),
        ("славянск-на-кубани", "slavyansk_na_kubani"),
        ("сочи", "sochi_adler"),
        ("тамань", "tamany"),
        ("тихорецк", "tikhoretsk"),
        ("туапсе", "tuapse"),
        ("усть-лабинск", "ust_labinsk"),
        ("белогорка", "belogorka"),
        ("винницы", "vinnitsy"),
        ("вознесенье", "voznesenye"),
        ("волосово", "volosovo"),
        ("выборг", "vyborg"),
        ("ефимовская", "efimovskaya"),
        ("кингисепп", "kingisepp"),
        ("кириши", "kirishi"),
        ("лодейное поле", "lodeynoye_pole"),
        ("луга", "luga"),
        ("николаевская", "nikolaevskaya"),
        ("новая ладога", "novaya_ladoga"),
        ("озерки", "ozerki"),
        ("петрокрепость", "petrokrepost"),
        ("приозерск", "priozersk"),
        ("санкт-петербург", "sankt_peterburg"),
        ("сосново", "sosnovo"),
        ("тихвин", "tikhvin"),
        ("переславль-залесский", "pereslavl_zalesskiy"),
        ("пошехонье", "poshekhonye"),
        ("ростов", "rostov"),
        ("рыбинск", "rybinsk"),
        ("ярославль", "yaroslavl"),
        ("волово", "volovo"),
        ("ефремов", "efremov"),
        ("новомосковск", "novomoskovsk"),
        ("тула", "tula"),
        ("анна", "anna"),
        ("богучар", "boguchar"),
        ("борисоглебск", "borisoglebsk"),
        ("калач", "kalach"),
        ("лиски", "liski"),
        ("павловск", "pavlovsk"),
        ("арзамас", "arzamas"),
        ("ветлуга", "vetluga"),
        ("воскресенское", "voskresenskoe"),
        ("выкса", "vyksa"),
        ("городец волжская гмо", "gorodets_volzhskaya_gmo"),
        ("красные баки", "krasnye_baki"),
        ("лукоянов", "lukoyanov"),
        ("лысково", "lyskovo"),
        ("нижний новгород-1", "nizhny_novgorod"),
        ("павлово", "pavlovo"),
        ("сергач", "sergach"),
        ("шахунья", "shakhunya"),
        ("алапаевск", "alapaevsk"),
        ("артемовский", "artemovsky"),
        ("бисерть", "biserte"),
        ("верхнее дуброво", "verhnee_dubrovo"),
        ("верхотурье", "verhoturye"),
        ("висим", "visim"),
        ("гари", "gari"),
        ("ивдель", "ivdel"),
        ("ирбит-фомино", "irbit_fomino"),
        ("каменск-уральский", "kamensk_uralsky"),
        ("камышлов", "kamyshlov"),
        ("кольцово", "kolcovo"),
        ("красноуфимск", "krasnoufimsk"),
        ("кушва", "kushva"),
        ("кытлым", "kytlym"),
        ("михайловск", "mihaylovsk"),
        ("невьянск", "nev'yansk"),
        ("нижний тагил", "nizhny_tagil"),
        ("понил", "ponil"),
        ("ревда", "revda"),
        ("североуральск", "severouralsk"),
        ("серов", "serov"),
        ("сысерть", "sysert"),
        ("таборы", "tabory"),
        ("тавда", "tavda"),
        ("тугулым", "tugulym"),
        ("туринск", "turinsk"),
        ("шамары", "shamary"),
        ("волжский", "volzhsky"),
        ("даниловка", "danilovka"),
        ("елань", "elan"),
        ("иловля", "ilovlya"),
        ("камышин", "kamyshin"),
        ("михайловка", "mihailovka"),
        ("нижний чир", "nizhny_chir"),
        ("паласовка", "pallasovka"),
        ("серафимович", "serafimovich"),
        ("урюпинск", "uryupinsk"),
        ("фролово", "frolovo"),
        ("эльтон", "elton"),
        ("большие кайбицы", "bolshie_kaybitsy"),
        ("бугульма", "bugulma"),
        ("елабуга", "elabuga"),
        ("лаишево", "laishevo"),
        ("муслюмово", "muslyumovo_1"),
        ("набережные челны", "naberezhnye_chelny"),
        ("тетюши", "tetyushi"),
        ("чистополь", "chistopol_b"),
        ("чулпаново", "chulpanovo"),
    ])
});

/// URL slug for a region name (case-insensitive).
pub fn region_code(name: &str) -> Option<&'static str> {
    REGIONS.get(name.trim().to_lowercase().as_str()).copied()
}

/// URL slug for a station name (case-insensitive).
pub fn station_code(name: &str) -> Option<&'static str> {
    STATIONS.get(name.trim().to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(region_code("Московская область"), Some("moscow-area"));
        assert_eq!(region_code("Саха(Якутия) республика"), Some("republic-sakha-yakutia"));
        assert_eq!(station_code("Клин"), Some("klin"));
        assert_eq!(station_code("Москва ВДНХ"), Some("moscow"));
        assert_eq!(region_code("Нарния"), None);
    }

    /// Main station of each region the first stage accepts.
    const REGION_STATIONS: &[(&str, &str)] = &[
        ("адыгея республика", "майкоп"),
        ("алтай республика", "горно-алтайск"),
        ("алтайский край", "барнаул"),
        ("амурская область", "благовещенск"),
        ("архангельская область", "архангельск"),
        ("астраханская область", "астрахань"),
        ("башкортостан республика", "уфа"),
        ("белгородская область", "белгород"),
        ("брянская область", "брянск"),
        ("бурятия республика", "улан-удэ"),
        ("владимирская область", "владимир"),
        ("волгоградская область", "волгоград"),
        ("вологодская область", "вологда"),
        ("воронежская область", "воронеж"),
        ("дагестан республика", "махачкала"),
        ("донецкая народная республика", "донецк"),
        ("еврейская автономная область", "биробиджан"),
        ("забайкальский край", "чита"),
        ("запорожская область", "бердянск"),
        ("ивановская область", "иваново"),
        ("ингушетия республика", "назарян"),
        ("иркутская область", "иркутск"),
        ("кабардино-балкария республика", "нальчик"),
        ("калининградская область", "калининград"),
        ("калмыкия республика", "элиста"),
        ("калужская область", "калуга"),
        ("камчатский край", "петропавловск"),
        ("карачаево-черкесия", "черкесск"),
        ("карелия республика", "петрозаводск"),
        ("кемеровская область", "кемерово"),
        ("кировская область", "киров"),
        ("коми республика", "сыктывкар"),
        ("костромская область", "кострома"),
        ("краснодарский край", "краснодар"),
        ("красноярский край", "красноярск"),
        ("крым республика", "симферополь"),
        ("курганская область", "курган"),
        ("курская область", "курск"),
        ("ленинградская область", "санкт-петербург"),
        ("липецкая область", "липецк"),
        ("луганская народная республика", "луганск"),
        ("магаданская область", "магадан"),
        ("марий эл республика", "йошкар-ола"),
        ("мордовия республика", "саранск"),
        ("московская область", "москва"),
        ("мурманская область", "мурманск"),
        ("ненецкий автономный округ", "нарьян-мар"),
        ("нижегородская область", "нижний новгород"),
        ("новгородская область", "новгород"),
        ("новосибирская область", "новосибирск"),
        ("омская область", "омск"),
        ("оренбургская область", "оренбург"),
        ("орловская область", "орёл"),
        ("пензенская область", "пенза"),
        ("пермский край", "пермь"),
        ("приморский край", "владивосток"),
        ("псковская область", "псков"),
        ("ростовская область", "ростов-на-дону"),
        ("рязанская область", "рязань"),
        ("самарская область", "самара"),
        ("саратовская область", "саратов"),
        ("саха(якутия) республика", "якутск"),
        ("сахалинская область", "южно-сахалинск"),
        ("свердловская область", "екатеринбург"),
        ("северная осетия-алания республика", "владикавказ"),
        ("смоленская область", "смоленск"),
        ("ставропольский край", "ставрополь"),
        ("тамбовская область", "тамбов"),
        ("татарстан республика", "казань"),
        ("тверская область", "тверь"),
        ("тульская область", "тула"),
        ("тюменская область", "тюмень"),
        ("удмуртия республика", "ижевск"),
        ("ульяновская область", "ульяновск"),
        ("хабаровский край", "хабаровск"),
        ("хакасия республика", "абакан"),
        ("чеченская республика", "грозный"),
        ("чувашская республика", "чебоксары"),
        ("чукотский автономный округ", "анадырь"),
        ("ямало-ненецкий ао", "салехард"),
        ("ярославская область", "ярославль"),
    ];

    /// Regions with no station on the source site.
    const WITHOUT_STATIONS: &[&str] = &[
        "томская область",
        "тыва республика",
        "ханты-мансийский автономный округ",
        "херсонская область",
        "челябинская область",
    ];

    #[test]
    fn every_region_has_a_station() {
        for (region, station) in REGION_STATIONS {
            assert!(region_code(region).is_some(), "region {region}");
            assert!(station_code(station).is_some(), "station {station} for {region}");
        }

        for region in REGIONS.keys() {
            assert!(
                REGION_STATIONS.iter().any(|(r, _)| r == region) || WITHOUT_STATIONS.contains(region),
                "no station listed for {region}"
            );
        }
    }

    #[test]
    fn duplicated_names_keep_the_later_slug() {
        assert_eq!(station_code("Воронеж"), Some("voronezh_1"));
        assert_eq!(station_code("Екатеринбург"), Some("ekaterinburg"));
        assert_eq!(station_code("Чистополь"), Some("chistopol_b"));
        assert_eq!(station_code("Кашира"), Some("kashira"));
    }
}
