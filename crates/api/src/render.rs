//! HTML document rendering for catalog results.
//!
//! The document is a fixed header, one table row per movie in the order the
//! store returned them, and a fixed footer. All catalog text is escaped.

use cinedex_core::movie::Movie;
use html_escape::encode_text;

/// Fixed document header.
pub const HTML_HEADER: &str = "<!DOCTYPE html>\n\
    <html>\n\
    <head>\n\
    <link type='text/css' rel='stylesheet' href='movie.css'/>\n\
    </head>\n\
    <body>";

/// Fixed document footer.
pub const HTML_FOOTER: &str = "</body>\n</html>";

/// Render the full results document.
pub fn render_document(movies: &[Movie]) -> String {
    let mut html = String::from(HTML_HEADER);
    html.push('\n');

    if movies.is_empty() {
        html.push_str("<p class='no-results'>No movies found</p>\n");
    } else {
        html.push_str("<table class='movies'>\n");
        html.push_str(
            "<tr><th>Title</th><th>Year</th><th>Genres</th>\
             <th>Rating</th><th>Raters</th><th>IMDb</th></tr>\n",
        );
        for movie in movies {
            push_movie_row(&mut html, movie);
        }
        html.push_str("</table>\n");
    }

    html.push_str(HTML_FOOTER);
    html
}

fn push_movie_row(html: &mut String, movie: &Movie) {
    html.push_str(&format!(
        "<tr id='movie-{id}'><td>{title}</td><td>{year}</td><td>{genres}</td>\
         <td>{rating:.2}</td><td>{raters}</td>\
         <td><a href='https://www.imdb.com/title/tt{imdb:07}/'>tt{imdb:07}</a></td></tr>\n",
        id = movie.id,
        title = encode_text(&movie.title),
        year = movie.year,
        genres = encode_text(&movie.genres.replace('|', ", ")),
        rating = movie.rating,
        raters = movie.num_raters,
        imdb = movie.imdb_id,
    ));
}
