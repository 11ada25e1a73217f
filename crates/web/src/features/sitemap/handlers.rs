use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Utc;

use crate::state::AppState;

const PUBLIC_PATHS: [(&str, &str, &str); 4] = [
    ("/", "weekly", "1.0"),
    ("/login", "monthly", "0.8"),
    ("/register", "monthly", "0.8"),
    ("/onboarding", "monthly", "0.6"),
];

pub fn render_sitemap(origin: &str, last_modified: &str) -> String {
    let origin = origin.trim_end_matches('/');

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (path, change_freq, priority) in PUBLIC_PATHS {
        xml.push_str(&format!(
            "  <url>\n    <loc>{origin}{path}</loc>\n    <lastmod>{last_modified}</lastmod>\n    \
             <changefreq>{change_freq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let today = Utc::now().date_naive().to_string();

    (
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap(&state.config.public_origin, &today),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_lists_public_pages() {
        let xml = render_sitemap("https://deporty.app/", "2025-01-16");

        for path in ["/", "/login", "/register", "/onboarding"] {
            assert!(xml.contains(&format!("<loc>https://deporty.app{path}</loc>")));
        }
        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<lastmod>2025-01-16</lastmod>"));
        assert!(xml.starts_with("<?xml"));
    }
}
