use chrono::NaiveDate;
use crate::error::ApiError;

/// Filtros del informe de checklists. No se persiste.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sector_id: Option<i64>,
    pub equipment_id: Option<i64>,
}

impl ReportFilter {
    /// Construir desde los valores crudos de los inputs (vacío = sin filtro)
    pub fn from_inputs(
        start_date: &str,
        end_date: &str,
        sector_id: &str,
        equipment_id: &str,
    ) -> Result<Self, ApiError> {
        let filter = Self {
            start_date: parse_date("Data inicial", start_date)?,
            end_date: parse_date("Data final", end_date)?,
            sector_id: parse_id("Setor", sector_id)?,
            equipment_id: parse_id("Equipamento", equipment_id)?,
        };

        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            if start > end {
                return Err(ApiError::ValidationFailure(
                    "A data inicial deve ser anterior à data final.".to_string(),
                ));
            }
        }

        Ok(filter)
    }

    /// Pares clave/valor en orden fijo, sin campos vacíos
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(d) = self.start_date {
            pairs.push(("start_date", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.end_date {
            pairs.push(("end_date", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = self.sector_id {
            pairs.push(("sector_id", id.to_string()));
        }
        if let Some(id) = self.equipment_id {
            pairs.push(("equipment_id", id.to_string()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.query_pairs())
    }

    /// Query de exportación: `format` primero, luego los filtros
    pub fn export_query(&self, format: ExportFormat) -> String {
        let mut pairs = vec![("format", format.as_param().to_string())];
        pairs.extend(self.query_pairs());
        encode_pairs(&pairs)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_param(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Nombre usado cuando el servidor no manda Content-Disposition
    pub fn default_filename(&self, today: NaiveDate) -> String {
        format!("relatorio_checklists_{}.{}", today.format("%Y%m%d"), self.as_param())
    }
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ApiError::ValidationFailure(format!("{}: data inválida ({})", field, raw)))
}

fn parse_id(field: &str, raw: &str) -> Result<Option<i64>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ApiError::ValidationFailure(format!("{}: valor inválido ({})", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_omits_empty_fields() {
        let filter = ReportFilter::from_inputs("2024-03-01", "", "4", "").unwrap();
        assert_eq!(filter.to_query_string(), "start_date=2024-03-01&sector_id=4");
    }

    #[test]
    fn test_empty_filter_has_empty_query() {
        let filter = ReportFilter::from_inputs("", " ", "", "").unwrap();
        assert_eq!(filter, ReportFilter::default());
        assert_eq!(filter.to_query_string(), "");
    }

    #[test]
    fn test_key_order_is_fixed() {
        let filter = ReportFilter::from_inputs("2024-01-01", "2024-01-31", "2", "9").unwrap();
        assert_eq!(
            filter.to_query_string(),
            "start_date=2024-01-01&end_date=2024-01-31&sector_id=2&equipment_id=9"
        );
    }

    #[test]
    fn test_export_query_starts_with_format() {
        let filter = ReportFilter::from_inputs("", "2024-01-31", "", "").unwrap();
        assert_eq!(filter.export_query(ExportFormat::Xlsx), "format=xlsx&end_date=2024-01-31");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = ReportFilter::from_inputs("2024-02-01", "2024-01-01", "", "").unwrap_err();
        assert!(matches!(err, ApiError::ValidationFailure(_)));
    }

    #[test]
    fn test_bad_sector_is_rejected() {
        assert!(ReportFilter::from_inputs("", "", "abc", "").is_err());
    }

    #[test]
    fn test_default_filename() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(ExportFormat::Csv.default_filename(day), "relatorio_checklists_20240709.csv");
    }
}
