//! Grouping of pages into series
//!
//! Pages with identical shape and element type form one series; series
//! are ordered by the first page that belongs to them. A file whose pages
//! all agree therefore has exactly one series.

use crate::tiff::handle::{PageInfo, SeriesInfo};

/// Group pages into series
///
/// # Arguments
/// * `pages` - Pages of one file, in IFD order
///
/// # Returns
/// The series of the file, ordered by first appearance
pub fn group_pages(pages: &[PageInfo]) -> Vec<SeriesInfo> {
    let mut series: Vec<SeriesInfo> = Vec::new();

    for page in pages {
        match series
            .iter_mut()
            .find(|s| s.shape == page.shape && s.dtype == page.dtype)
        {
            Some(existing) => existing.pages.push(page.index),
            None => series.push(SeriesInfo {
                shape: page.shape.clone(),
                dtype: page.dtype,
                pages: vec![page.index],
            }),
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::dtype::DataType;

    fn page(index: usize, shape: &[usize], dtype: DataType) -> PageInfo {
        PageInfo { index, shape: shape.to_vec(), dtype }
    }

    #[test]
    fn test_uniform_pages_form_one_series() {
        let pages = vec![
            page(0, &[4, 5], DataType::UInt8),
            page(1, &[4, 5], DataType::UInt8),
            page(2, &[4, 5], DataType::UInt8),
        ];
        let series = group_pages(&pages);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].pages, vec![0, 1, 2]);
        assert_eq!(series[0].shape, vec![4, 5]);
    }

    #[test]
    fn test_differing_pages_split() {
        let pages = vec![
            page(0, &[8, 8], DataType::UInt16),
            page(1, &[4, 4], DataType::UInt16),
            page(2, &[8, 8], DataType::UInt16),
            page(3, &[8, 8], DataType::Float32),
        ];
        let series = group_pages(&pages);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].pages, vec![0, 2]);
        assert_eq!(series[1].pages, vec![1]);
        assert_eq!(series[2].dtype, DataType::Float32);
    }

    #[test]
    fn test_no_pages() {
        assert!(group_pages(&[]).is_empty());
    }
}
