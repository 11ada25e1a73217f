//! Built-in countries and their largest cities.

use std::collections::HashSet;
use std::hash::Hash;

use storage::models::Country;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountrySeed {
    pub code: &'static str,
    pub name: &'static str,
    pub locale: &'static str,
    pub timezone: &'static str,
    pub currency: &'static str,
    pub currency_symbol: &'static str,
    pub phone_code: &'static str,
}

impl CountrySeed {
    /// Language subtag of the locale (`es-CO` gives `es`).
    pub fn language(&self) -> &'static str {
        self.locale.split('-').next().unwrap_or(self.locale)
    }
}

impl From<&CountrySeed> for Country {
    fn from(seed: &CountrySeed) -> Self {
        Self {
            code: seed.code.to_string(),
            name: seed.name.to_string(),
            locale: seed.locale.to_string(),
            language: seed.language().to_string(),
            timezone: seed.timezone.to_string(),
            currency: seed.currency.to_string(),
            currency_symbol: seed.currency_symbol.to_string(),
            phone_code: seed.phone_code.to_string(),
        }
    }
}

const fn country(
    code: &'static str,
    name: &'static str,
    locale: &'static str,
    timezone: &'static str,
    currency: &'static str,
    currency_symbol: &'static str,
    phone_code: &'static str,
) -> CountrySeed {
    CountrySeed {
        code,
        name,
        locale,
        timezone,
        currency,
        currency_symbol,
        phone_code,
    }
}

pub const COUNTRIES: [CountrySeed; 20] = [
    country("CO", "Colombia", "es-CO", "America/Bogota", "COP", "$", "+57"),
    country("MX", "Mexico", "es-MX", "America/Mexico_City", "MXN", "$", "+52"),
    country("AR", "Argentina", "es-AR", "America/Argentina/Buenos_Aires", "ARS", "$", "+54"),
    country("BR", "Brasil", "pt-BR", "America/Sao_Paulo", "BRL", "R$", "+55"),
    country("CL", "Chile", "es-CL", "America/Santiago", "CLP", "$", "+56"),
    country("PE", "Peru", "es-PE", "America/Lima", "PEN", "S/", "+51"),
    country("EC", "Ecuador", "es-EC", "America/Guayaquil", "USD", "$", "+593"),
    country("VE", "Venezuela", "es-VE", "America/Caracas", "USD", "$", "+58"),
    country("UY", "Uruguay", "es-UY", "America/Montevideo", "UYU", "$U", "+598"),
    country("PY", "Paraguay", "es-PY", "America/Asuncion", "PYG", "G", "+595"),
    country("BO", "Bolivia", "es-BO", "America/La_Paz", "BOB", "Bs", "+591"),
    country("PA", "Panama", "es-PA", "America/Panama", "USD", "$", "+507"),
    country("CR", "Costa Rica", "es-CR", "America/Costa_Rica", "CRC", "C", "+506"),
    country("DO", "Republica Dominicana", "es-DO", "America/Santo_Domingo", "DOP", "RD$", "+1-809"),
    country("GT", "Guatemala", "es-GT", "America/Guatemala", "GTQ", "Q", "+502"),
    country("HN", "Honduras", "es-HN", "America/Tegucigalpa", "HNL", "L", "+504"),
    country("SV", "El Salvador", "es-SV", "America/El_Salvador", "USD", "$", "+503"),
    country("NI", "Nicaragua", "es-NI", "America/Managua", "NIO", "C$", "+505"),
    country("CU", "Cuba", "es-CU", "America/Havana", "CUP", "$", "+53"),
    country("PR", "Puerto Rico", "es-PR", "America/Puerto_Rico", "USD", "$", "+1-787"),
];

/// `(country code, city name)` pairs, five per country.
pub const CITIES: [(&str, &str); 100] = [
    ("CO", "Bogota"),
    ("CO", "Medellin"),
    ("CO", "Cali"),
    ("CO", "Barranquilla"),
    ("CO", "Bucaramanga"),
    ("MX", "Ciudad de Mexico"),
    ("MX", "Guadalajara"),
    ("MX", "Monterrey"),
    ("MX", "Puebla"),
    ("MX", "Tijuana"),
    ("AR", "Buenos Aires"),
    ("AR", "Cordoba"),
    ("AR", "Rosario"),
    ("AR", "Mendoza"),
    ("AR", "La Plata"),
    ("BR", "Sao Paulo"),
    ("BR", "Rio de Janeiro"),
    ("BR", "Brasilia"),
    ("BR", "Salvador"),
    ("BR", "Fortaleza"),
    ("CL", "Santiago"),
    ("CL", "Valparaiso"),
    ("CL", "Concepcion"),
    ("CL", "La Serena"),
    ("CL", "Antofagasta"),
    ("PE", "Lima"),
    ("PE", "Arequipa"),
    ("PE", "Trujillo"),
    ("PE", "Chiclayo"),
    ("PE", "Piura"),
    ("EC", "Quito"),
    ("EC", "Guayaquil"),
    ("EC", "Cuenca"),
    ("EC", "Manta"),
    ("EC", "Ambato"),
    ("VE", "Caracas"),
    ("VE", "Maracaibo"),
    ("VE", "Valencia"),
    ("VE", "Barquisimeto"),
    ("VE", "Maracay"),
    ("UY", "Montevideo"),
    ("UY", "Salto"),
    ("UY", "Paysandu"),
    ("UY", "Las Piedras"),
    ("UY", "Rivera"),
    ("PY", "Asuncion"),
    ("PY", "Ciudad del Este"),
    ("PY", "San Lorenzo"),
    ("PY", "Luque"),
    ("PY", "Encarnacion"),
    ("BO", "La Paz"),
    ("BO", "Santa Cruz"),
    ("BO", "Cochabamba"),
    ("BO", "Oruro"),
    ("BO", "Sucre"),
    ("PA", "Ciudad de Panama"),
    ("PA", "San Miguelito"),
    ("PA", "Colon"),
    ("PA", "David"),
    ("PA", "La Chorrera"),
    ("CR", "San Jose"),
    ("CR", "Alajuela"),
    ("CR", "Cartago"),
    ("CR", "Heredia"),
    ("CR", "Puntarenas"),
    ("DO", "Santo Domingo"),
    ("DO", "Santiago"),
    ("DO", "La Vega"),
    ("DO", "San Pedro"),
    ("DO", "San Cristobal"),
    ("GT", "Ciudad de Guatemala"),
    ("GT", "Mixco"),
    ("GT", "Villa Nueva"),
    ("GT", "Quetzaltenango"),
    ("GT", "Escuintla"),
    ("HN", "Tegucigalpa"),
    ("HN", "San Pedro Sula"),
    ("HN", "La Ceiba"),
    ("HN", "Choloma"),
    ("HN", "Comayagua"),
    ("SV", "San Salvador"),
    ("SV", "Santa Ana"),
    ("SV", "San Miguel"),
    ("SV", "Soyapango"),
    ("SV", "Mejicanos"),
    ("NI", "Managua"),
    ("NI", "Leon"),
    ("NI", "Masaya"),
    ("NI", "Chinandega"),
    ("NI", "Granada"),
    ("CU", "La Habana"),
    ("CU", "Santiago de Cuba"),
    ("CU", "Camaguey"),
    ("CU", "Holguin"),
    ("CU", "Santa Clara"),
    ("PR", "San Juan"),
    ("PR", "Bayamon"),
    ("PR", "Carolina"),
    ("PR", "Ponce"),
    ("PR", "Caguas"),
];

/// Keys that appear more than once, in first-seen order.
pub fn find_duplicates<T, K, F>(items: &[T], key: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        let k = key(item);
        if !seen.insert(k.clone()) && !duplicates.contains(&k) {
            duplicates.push(k);
        }
    }

    duplicates
}
