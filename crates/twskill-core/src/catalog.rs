//! Domain catalogs: which knowledge tables a package ships and how each one
//! is searched.
//!
//! A [`Catalog`] is plain immutable data. The three built-in packages are
//! declared here; other catalogs can be read from TOML with
//! [`Catalog::from_toml_file`].

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use figment::providers::{Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The skill packages bundled with this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Package {
    Invoice,
    Logistics,
    Payment,
}

impl Package {
    pub const ALL: [Package; 3] = [Package::Invoice, Package::Logistics, Package::Payment];

    pub fn as_str(self) -> &'static str {
        match self {
            Package::Invoice => "invoice",
            Package::Logistics => "logistics",
            Package::Payment => "payment",
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" => Ok(Package::Invoice),
            "logistics" => Ok(Package::Logistics),
            "payment" => Ok(Package::Payment),
            other => Err(Error::UnknownPackage(other.to_string())),
        }
    }
}

/// One searchable knowledge table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSpec {
    pub name: String,
    pub file: String,
    pub search_cols: Vec<String>,
    pub output_cols: Vec<String>,
    /// Substrings that vote for this domain during auto-detection.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub package: String,
    pub title: String,
    /// Domain picked when no detection keyword matches a query.
    pub default_domain: String,
    pub domains: Vec<DomainSpec>,
}

impl Catalog {
    pub fn builtin(package: Package) -> Self {
        let (title, default_domain, domains) = match package {
            Package::Invoice => ("Taiwan Invoice", "troubleshoot", INVOICE_DOMAINS),
            Package::Logistics => ("Taiwan Logistics", "provider", LOGISTICS_DOMAINS),
            Package::Payment => ("Taiwan Payment", "provider", PAYMENT_DOMAINS),
        };
        Self {
            package: package.as_str().to_string(),
            title: title.to_string(),
            default_domain: default_domain.to_string(),
            domains: domains.iter().map(BuiltinDomain::to_spec).collect(),
        }
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(format!("catalog file {}", path.display())));
        }
        let catalog: Catalog = Figment::new().merge(Toml::file(path)).extract()?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let catalog: Catalog = Figment::new().merge(Toml::string(source)).extract()?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(Error::InvalidConfig(format!("catalog '{}' declares no domains", self.package)));
        }
        let mut seen = HashSet::new();
        for domain in &self.domains {
            if !seen.insert(domain.name.as_str()) {
                return Err(Error::InvalidConfig(format!("duplicate domain '{}'", domain.name)));
            }
            if domain.search_cols.is_empty() {
                return Err(Error::InvalidConfig(format!("domain '{}' has no search columns", domain.name)));
            }
            if domain.file.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("domain '{}' has no file", domain.name)));
            }
        }
        if !seen.contains(self.default_domain.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "default domain '{}' is not declared",
                self.default_domain
            )));
        }
        Ok(())
    }

    pub fn domain(&self, name: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }
}

struct BuiltinDomain {
    name: &'static str,
    file: &'static str,
    search: &'static [&'static str],
    output: &'static [&'static str],
    keywords: &'static [&'static str],
}

impl BuiltinDomain {
    fn to_spec(&self) -> DomainSpec {
        let owned = |cols: &[&str]| cols.iter().map(|c| (*c).to_string()).collect::<Vec<_>>();
        DomainSpec {
            name: self.name.to_string(),
            file: self.file.to_string(),
            search_cols: owned(self.search),
            output_cols: owned(self.output),
            keywords: owned(self.keywords),
        }
    }
}

const INVOICE_DOMAINS: &[BuiltinDomain] = &[
    BuiltinDomain {
        name: "provider",
        file: "providers.csv",
        search: &["provider", "display_name", "auth_method", "features"],
        output: &["provider", "display_name", "auth_method", "encryption", "test_merchant_id", "features"],
        keywords: &["ecpay", "綠界", "smilepay", "速買配", "amego", "光貿", "provider", "加值中心", "服務商"],
    },
    BuiltinDomain {
        name: "operation",
        file: "operations.csv",
        search: &["operation", "operation_zh", "notes"],
        output: &[
            "operation",
            "operation_zh",
            "ecpay_b2c_endpoint",
            "smilepay_endpoint",
            "amego_endpoint",
            "required_fields",
            "notes",
        ],
        keywords: &[
            "issue", "void", "allowance", "開立", "作廢", "折讓", "列印", "print", "query", "查詢", "endpoint", "api",
        ],
    },
    BuiltinDomain {
        name: "error",
        file: "error-codes.csv",
        search: &["provider", "code", "message_zh", "message_en", "category", "solution"],
        output: &["provider", "code", "message_zh", "category", "solution"],
        keywords: &["error", "code", "錯誤", "代碼", "失敗", "fail", "-", "10000", "1001", "2001"],
    },
    BuiltinDomain {
        name: "field",
        file: "field-mappings.csv",
        search: &["field_name", "description", "ecpay_name", "smilepay_name", "amego_name", "notes"],
        output: &[
            "field_name",
            "description",
            "ecpay_name",
            "smilepay_name",
            "amego_name",
            "type",
            "required_b2c",
            "required_b2b",
        ],
        keywords: &["field", "param", "欄位", "參數", "mapping", "映射", "merchantid", "orderid", "buyername"],
    },
    BuiltinDomain {
        name: "tax",
        file: "tax-rules.csv",
        search: &["invoice_type", "tax_type", "notes"],
        output: &[
            "invoice_type",
            "tax_type",
            "tax_rate",
            "sales_amount_formula",
            "tax_amount_formula",
            "example_total",
            "example_sales",
            "example_tax",
        ],
        keywords: &["tax", "b2c", "b2b", "稅", "應稅", "免稅", "零稅率", "salesamount", "taxamount", "計算"],
    },
    BuiltinDomain {
        name: "troubleshoot",
        file: "troubleshooting.csv",
        search: &["issue", "symptom", "cause", "solution", "provider", "category"],
        output: &["issue", "symptom", "cause", "solution", "provider", "severity"],
        keywords: &["問題", "issue", "error", "fix", "解決", "失敗", "空白", "troubleshoot", "踩坑"],
    },
    BuiltinDomain {
        name: "reasoning",
        file: "reasoning.csv",
        search: &["scenario", "recommended_provider", "reason", "decision_rules", "use_cases"],
        output: &["scenario", "recommended_provider", "confidence", "reason", "anti_patterns", "use_cases"],
        keywords: &[
            "推薦", "recommend", "選擇", "choose", "適合", "suitable", "場景", "scenario", "決策", "decision",
        ],
    },
];

const LOGISTICS_DOMAINS: &[BuiltinDomain] = &[
    BuiltinDomain {
        name: "provider",
        file: "providers.csv",
        search: &["provider", "name_zh", "name_en", "features"],
        output: &["provider", "name_zh", "type", "test_merchant_id", "test_hash_key", "features", "coverage"],
        keywords: &["ecpay", "綠界", "newebpay", "藍新", "payuni", "統一", "物流", "服務商", "provider"],
    },
    BuiltinDomain {
        name: "operation",
        file: "operations.csv",
        search: &["operation", "operation_zh", "ecpay_endpoint", "required_fields", "notes"],
        output: &[
            "operation",
            "operation_zh",
            "ecpay_endpoint",
            "method",
            "required_fields",
            "optional_fields",
            "notes",
        ],
        keywords: &["create", "query", "print", "map", "建立", "查詢", "列印", "電子地圖", "api", "endpoint"],
    },
    BuiltinDomain {
        name: "logistics_type",
        file: "logistics-types.csv",
        search: &["code", "name_zh", "name_en", "provider", "notes"],
        output: &["code", "name_zh", "provider", "category", "size_limit", "weight_limit", "notes"],
        keywords: &[
            "711", "7-11", "family", "全家", "hilife", "萊爾富", "okmart", "tcat", "黑貓", "超商", "宅配", "cvs", "home",
        ],
    },
    BuiltinDomain {
        name: "field",
        file: "field-mappings.csv",
        search: &["field_name", "field_zh", "ecpay_name", "newebpay_name", "payuni_name", "notes"],
        output: &[
            "field_name",
            "field_zh",
            "ecpay_name",
            "newebpay_name",
            "payuni_name",
            "type",
            "required",
            "format",
            "notes",
        ],
        keywords: &["field", "parameter", "參數", "欄位", "merchantid", "tradeno", "logistics"],
    },
    BuiltinDomain {
        name: "status",
        file: "status-codes.csv",
        search: &["provider", "code", "status_zh", "status_en", "description"],
        output: &["provider", "code", "status_zh", "category", "description"],
        keywords: &["status", "code", "狀態", "配送", "取貨", "完成", "失敗", "300", "3001"],
    },
];

const PAYMENT_DOMAINS: &[BuiltinDomain] = &[
    BuiltinDomain {
        name: "provider",
        file: "providers.csv",
        search: &["provider", "display_name", "auth_method", "features", "api_style"],
        output: &[
            "provider",
            "display_name",
            "auth_method",
            "encryption",
            "test_merchant_id",
            "features",
            "market_share",
            "api_style",
        ],
        keywords: &["ecpay", "綠界", "newebpay", "藍新", "payuni", "統一", "金流", "服務商", "provider"],
    },
    BuiltinDomain {
        name: "operation",
        file: "operations.csv",
        search: &["operation", "name_zh", "name_en", "description"],
        output: &[
            "operation",
            "name_zh",
            "ecpay_endpoint",
            "newebpay_endpoint",
            "payuni_endpoint",
            "required_fields",
            "description",
        ],
        keywords: &[
            "create", "query", "refund", "void", "建立", "查詢", "退款", "作廢", "請款", "api", "endpoint",
        ],
    },
    BuiltinDomain {
        name: "error",
        file: "error-codes.csv",
        search: &["provider", "code", "message_zh", "message_en", "category", "solution"],
        output: &["provider", "code", "message_zh", "category", "severity", "solution"],
        keywords: &["error", "code", "錯誤", "失敗", "failed", "10100", "10200", "TRA"],
    },
    BuiltinDomain {
        name: "field",
        file: "field-mappings.csv",
        search: &["field_name", "field_zh", "ecpay_name", "newebpay_name", "payuni_name", "notes"],
        output: &[
            "field_name",
            "field_zh",
            "ecpay_name",
            "newebpay_name",
            "payuni_name",
            "type",
            "required",
            "format",
            "notes",
        ],
        keywords: &["field", "parameter", "參數", "欄位", "merchantid", "tradeno", "amount"],
    },
    BuiltinDomain {
        name: "payment_method",
        file: "payment-methods.csv",
        search: &[
            "method_id",
            "name_zh",
            "name_en",
            "ecpay_code",
            "newebpay_code",
            "payuni_code",
            "description",
            "features",
        ],
        output: &[
            "method_id",
            "name_zh",
            "ecpay_code",
            "newebpay_code",
            "payuni_code",
            "category",
            "description",
            "features",
        ],
        keywords: &["credit", "atm", "cvs", "barcode", "信用卡", "轉帳", "超商", "支付", "付款方式", "payment"],
    },
    BuiltinDomain {
        name: "troubleshoot",
        file: "troubleshooting.csv",
        search: &["issue", "symptom", "cause", "solution", "provider"],
        output: &["issue", "symptom", "cause", "solution", "provider", "severity"],
        keywords: &["troubleshoot", "issue", "problem", "問題", "疑難", "排解", "如何", "how to"],
    },
    BuiltinDomain {
        name: "reasoning",
        file: "reasoning.csv",
        search: &["scenario", "recommended_provider", "reason", "use_cases", "anti_patterns"],
        output: &["scenario", "recommended_provider", "confidence", "reason", "anti_patterns", "use_cases"],
        keywords: &["recommend", "choose", "select", "推薦", "選擇", "建議", "適合", "比較", "why", "為什麼"],
    },
];
