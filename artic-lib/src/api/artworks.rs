//! Artwork listing endpoint.

use reqwest::Method;
use url::Url;

use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::fetcher::PageQuery;
use crate::model::Artwork;
use crate::model::Page;
use crate::model::PageResponse;

impl ArticClient {
    /// Fetches one page of artworks.
    ///
    /// Issues `GET {base}/artworks?page={n}&limit={size}&fields=...`, projecting
    /// only the fields the table shows.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = client.fetch_page(PageQuery::new(2, 12)?).await?;
    /// assert_eq!(page.pagination().current_page, 2);
    /// ```
    pub async fn fetch_page(&self, query: PageQuery) -> Result<Page, Error> {
        let url = self.artworks_url(query)?;
        log::debug!("GET {}", url);

        let response = self.request(Method::GET, &url).await?;
        let body = response.text().await.map_err(ApiError::from)?;

        let parsed: PageResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        log::debug!(
            "page {} loaded: {} records of {}",
            parsed.pagination.current_page,
            parsed.data.len(),
            parsed.pagination.total
        );
        Ok(parsed.into())
    }

    pub(crate) fn artworks_url(&self, query: PageQuery) -> Result<Url, ApiError> {
        let mut url = self
            .inner
            .base_url
            .join("artworks")
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("limit", &query.page_size.to_string())
            .append_pair("fields", &Artwork::FIELDS.join(","));

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artworks_url() {
        let client = ArticClient::new().unwrap();
        let url = client
            .artworks_url(PageQuery::new(3, 25).unwrap())
            .unwrap();

        assert_eq!(url.path(), "/api/v1/artworks");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("limit".to_string(), "25".to_string()),
                (
                    "fields".to_string(),
                    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end"
                        .to_string()
                ),
            ]
        );
    }
}
