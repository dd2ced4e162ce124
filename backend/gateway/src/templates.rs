//! HTML pages rendered with maud.
//!
//! Markup is built from structured data (name lists, caption records) so
//! rendering stays testable without going through a request.

use maud::{html, Markup, DOCTYPE};
use picshelf_core::CaptionRecord;

use crate::handlers::UPLOAD_FIELD;

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

/// Gallery page: upload form plus one link per stored image.
pub fn gallery_page(names: &[String]) -> Markup {
    let content = html! {
        form method="post" enctype="multipart/form-data" action="/upload" {
            div {
                label for="file" { "Choose file to upload" }
                input type="file" id="file" name=(UPLOAD_FIELD) accept="image/jpeg";
            }
            div {
                button { "Submit" }
            }
        }
        ul {
            @for name in names {
                li {
                    a href={ "/files/" (name) } { (name) }
                }
            }
        }
    };
    base_document("Gallery", content)
}

/// Detail page: generated title and description above the image itself.
pub fn detail_page(name: &str, record: &CaptionRecord) -> Markup {
    let content = html! {
        h1 { (record.title) }
        p { (record.description) }
        img src={ "/image/" (name) } alt=(record.title);
        p {
            a href="/" { "Back to gallery" }
        }
    };
    base_document(&record.title, content)
}
