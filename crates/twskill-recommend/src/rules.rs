//! Declarative recommendation rules per package.

use twskill_core::Package;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provider {
    /// Identifier as written in the `provider` and `recommended_provider` columns.
    pub id: &'static str,
    pub display_name: &'static str,
}

/// A query keyword and the votes it casts.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub votes: &'static [Vote],
}

#[derive(Debug, Clone, Copy)]
pub struct Vote {
    pub provider: &'static str,
    pub weight: u32,
    pub reason: &'static str,
}

/// A caveat about `provider`, keyed by the scenario `trigger` it applies to.
#[derive(Debug, Clone, Copy)]
pub struct AntiPattern {
    pub provider: &'static str,
    pub trigger: &'static str,
    pub warning: &'static str,
}

/// Which anti-patterns of the winner are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningMode {
    /// Only those whose trigger occurs in the query.
    Triggered,
    /// All of them, as `trigger: warning`.
    Always,
}

/// How a `reasoning` table row is matched against the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningMatch {
    /// A scenario or use-case word occurs in the query, or a query word occurs in the scenario.
    Broad,
    /// A query word occurs in the scenario.
    Scenario,
}

/// Pick used with score 1 when nothing in the query scores.
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub provider: &'static str,
    pub reasons: &'static [&'static str],
}

#[derive(Debug)]
pub struct RuleBook {
    pub package: Package,
    /// Candidates in ranking tie-break order.
    pub providers: &'static [Provider],
    pub keyword_rules: &'static [KeywordRule],
    pub anti_patterns: &'static [AntiPattern],
    pub reasoning_match: ReasoningMatch,
    /// When set, a reason already recorded for a provider adds no weight.
    pub dedup_reasons: bool,
    pub warnings: WarningMode,
    pub fallback: Option<Fallback>,
}

impl RuleBook {
    /// Rule book of a bundled package; logistics ships none.
    pub fn builtin(package: Package) -> Option<&'static RuleBook> {
        match package {
            Package::Invoice => Some(&INVOICE),
            Package::Payment => Some(&PAYMENT),
            Package::Logistics => None,
        }
    }

    /// Position of a provider, matching ids case-insensitively.
    pub fn provider_index(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.providers.iter().position(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.provider_index(id).map(|i| &self.providers[i])
    }
}

const fn vote(provider: &'static str, weight: u32, reason: &'static str) -> Vote {
    Vote { provider, weight, reason }
}

const fn rule(keyword: &'static str, votes: &'static [Vote]) -> KeywordRule {
    KeywordRule { keyword, votes }
}

const fn anti(provider: &'static str, trigger: &'static str, warning: &'static str) -> AntiPattern {
    AntiPattern { provider, trigger, warning }
}

pub static INVOICE: RuleBook = RuleBook {
    package: Package::Invoice,
    providers: &[
        Provider { id: "ECPay", display_name: "綠界科技" },
        Provider { id: "SmilePay", display_name: "速買配" },
        Provider { id: "Amego", display_name: "光貿" },
    ],
    keyword_rules: &[
        rule("穩定", &[vote("ECPay", 3, "市佔率最高，系統穩定性佳")]),
        rule("市佔", &[vote("ECPay", 3, "台灣電子發票市佔率領先")]),
        rule("文檔", &[vote("ECPay", 2, "提供完整 API 文檔與 SDK")]),
        rule("sdk", &[vote("ECPay", 2, "官方 SDK 支援多種語言")]),
        rule("高交易量", &[vote("ECPay", 3, "適合高交易量電商")]),
        rule("電商", &[vote("ECPay", 2, "電商整合經驗豐富")]),
        rule("簡單", &[vote("SmilePay", 3, "整合流程最簡單")]),
        rule("快速", &[vote("SmilePay", 3, "最快速完成整合")]),
        rule("小型", &[vote("SmilePay", 2, "適合小型專案")]),
        rule("測試", &[vote("SmilePay", 2, "測試環境設定簡單")]),
        rule("無加密", &[vote("SmilePay", 3, "無需複雜加密流程")]),
        rule("便宜", &[vote("SmilePay", 2, "費用較低")]),
        rule("純b2c", &[vote("SmilePay", 3, "SmilePay 專注於 B2C 發票，API 設計簡潔")]),
        rule("48小時", &[vote("SmilePay", 2, "SmilePay B2C 須在 48 小時內開立")]),
        rule("字軌", &[vote("SmilePay", 2, "SmilePay 提供完整字軌管理功能")]),
        rule("allamount", &[vote("SmilePay", 2, "SmilePay 使用 AllAmount 進行金額驗算")]),
        rule("api", &[vote("Amego", 3, "MIG 4.0 最新 API 標準")]),
        rule("設計", &[vote("Amego", 2, "API 設計優良")]),
        rule("新", &[vote("Amego", 2, "採用最新技術標準")]),
        rule("mig", &[vote("Amego", 3, "完整支援 MIG 4.0 規範")]),
        rule("標準", &[vote("Amego", 2, "API 設計符合業界標準")]),
        rule("md5", &[vote("Amego", 3, "Amego 使用 MD5 簽章驗證，計算簡單")]),
        rule("detailvat", &[vote("Amego", 3, "Amego 使用 DetailVat 區分含稅/未稅")]),
        rule("json", &[vote("Amego", 3, "Amego 回應格式為標準 JSON，易於解析")]),
        rule("國際化", &[vote("Amego", 2, "Amego API 文件提供英文版，適合國際團隊")]),
        rule("b2b", &[vote("ECPay", 1, "B2B 發票功能完整"), vote("Amego", 1, "B2B 計算清晰")]),
        rule("b2c", &[vote("ECPay", 1, "B2C 市佔最高"), vote("SmilePay", 1, "B2C 整合簡單")]),
        rule("統編", &[vote("ECPay", 1, "B2B 統編發票經驗豐富")]),
        rule("列印", &[vote("ECPay", 2, "列印功能完整"), vote("SmilePay", 1, "支援列印")]),
        rule("作廢", &[vote("ECPay", 1, "作廢流程完整")]),
        rule("折讓", &[vote("ECPay", 1, "折讓功能完整")]),
        rule("載具", &[vote("ECPay", 1, "載具支援完整"), vote("SmilePay", 1, "載具整合簡單")]),
        rule("捐贈", &[vote("ECPay", 1, "捐贈功能完整")]),
    ],
    anti_patterns: &[
        anti("ECPay", "無技術資源", "加密流程較複雜，需要一定技術能力"),
        anti("ECPay", "極簡整合", "如果只需最簡單整合，SmilePay 可能更適合"),
        anti("SmilePay", "高交易量", "大型電商建議使用 ECPay 以確保穩定性"),
        anti("SmilePay", "複雜需求", "API 功能相對基本，複雜需求可能受限"),
        anti("SmilePay", "b2b", "B2B 發票功能較少文檔"),
        anti("Amego", "市佔", "市佔率相對較低"),
        anti("Amego", "社群", "社群支援與範例相對較少"),
        anti("Amego", "穩定", "如果穩定性是首要考量，ECPay 更保險"),
    ],
    reasoning_match: ReasoningMatch::Broad,
    dedup_reasons: true,
    warnings: WarningMode::Triggered,
    fallback: Some(Fallback { provider: "ECPay", reasons: &["市佔率最高，適合大多數場景", "文檔完整，社群支援豐富"] }),
};

pub static PAYMENT: RuleBook = RuleBook {
    package: Package::Payment,
    providers: &[
        Provider { id: "ecpay", display_name: "綠界科技 ECPay" },
        Provider { id: "newebpay", display_name: "藍新金流 NewebPay" },
        Provider { id: "payuni", display_name: "統一金流 PAYUNi" },
    ],
    keyword_rules: &[
        rule("穩定", &[vote("ecpay", 3, "市佔率最高，穩定性最佳")]),
        rule("高交易", &[vote("ecpay", 3, "適合高交易量場景")]),
        rule("快速", &[vote("ecpay", 2, "文檔完整，整合快速")]),
        rule("簡單", &[vote("ecpay", 2, "範例豐富，容易上手")]),
        rule("整合", &[vote("ecpay", 2, "社群資源豐富")]),
        rule("多元", &[vote("newebpay", 3, "支援最多支付方式")]),
        rule("支付方式", &[vote("newebpay", 3, "13 種付款方式")]),
        rule("電子錢包", &[vote("newebpay", 3, "LINE Pay / Apple Pay / Google Pay")]),
        rule("line", &[vote("newebpay", 3, "原生支援 LINE Pay")]),
        rule("行動", &[vote("newebpay", 3, "行動支付完整")]),
        rule("記憶", &[vote("newebpay", 3, "信用卡記憶功能")]),
        rule("會員", &[vote("newebpay", 2, "適合會員制電商")]),
        rule("api", &[vote("payuni", 3, "RESTful JSON API")]),
        rule("json", &[vote("payuni", 3, "JSON 格式友好")]),
        rule("restful", &[vote("payuni", 3, "RESTful 設計")]),
        rule("統一", &[vote("payuni", 2, "統一集團背景")]),
        rule("新創", &[vote("payuni", 2, "API 設計優先")]),
        rule("aes-gcm", &[vote("payuni", 3, "AES-256-GCM 加密提供更高安全性")]),
        rule("gcm", &[vote("payuni", 3, "使用 GCM 認證加密")]),
        rule("銀聯", &[vote("payuni", 3, "支援銀聯卡等國際支付")]),
        rule("unionpay", &[vote("payuni", 3, "支援銀聯卡")]),
        rule("apple pay", &[vote("payuni", 3, "整合 Apple Pay 和 Google Pay")]),
        rule("google pay", &[vote("payuni", 3, "整合 Apple Pay 和 Google Pay")]),
        rule("icash", &[vote("payuni", 3, "整合 icash Pay 電子支付")]),
        rule("電子支付", &[vote("payuni", 2, "支援 icash Pay")]),
        rule("atm", &[vote("ecpay", 2, "ATM 虛擬帳號")]),
        rule("超商", &[vote("ecpay", 2, "四大超商支援")]),
        rule("定期", &[vote("ecpay", 3, "定期定額扣款")]),
        rule("訂閱", &[vote("ecpay", 3, "訂閱制服務")]),
        rule("分期", &[vote("ecpay", 3, "信用卡分期")]),
        rule("bnpl", &[vote("ecpay", 2, "先買後付")]),
        rule("測試", &[vote("ecpay", 2, "測試帳號完整")]),
        rule("php", &[vote("ecpay", 2, "PHP SDK 完整")]),
        rule("node", &[vote("payuni", 2, "JSON API 友好")]),
        rule("python", &[vote("ecpay", 2, "Python 範例完整")]),
        rule("app", &[vote("newebpay", 3, "行動支付完整")]),
        rule("跨境", &[vote("newebpay", 2, "支援國際卡")]),
        rule("發票", &[vote("ecpay", 2, "同時支援金流發票")]),
        rule("物流", &[vote("ecpay", 2, "同時支援金流物流")]),
    ],
    anti_patterns: &[
        anti("ecpay", "無技術資源", "SHA256 加密流程較複雜，建議有技術人員"),
        anti("ecpay", "極簡需求", "若只需基礎支付，可能功能過多"),
        anti("newebpay", "簡單 API", "AES 雙層加密較複雜"),
        anti("newebpay", "單一支付", "若只需單一支付方式，不需選擇此平台"),
        anti("payuni", "大型專案", "社群資源較少，大型專案建議選 ECPay"),
        anti("payuni", "完整文檔", "文檔完整度不如 ECPay"),
    ],
    reasoning_match: ReasoningMatch::Scenario,
    dedup_reasons: false,
    warnings: WarningMode::Always,
    fallback: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistics_has_no_rule_book() {
        assert!(RuleBook::builtin(Package::Logistics).is_none());
        assert_eq!(RuleBook::builtin(Package::Payment).map(|r| r.package), Some(Package::Payment));
    }

    #[test]
    fn every_vote_and_warning_names_a_known_provider() {
        for book in [&INVOICE, &PAYMENT] {
            for rule in book.keyword_rules {
                assert_eq!(rule.keyword, rule.keyword.to_lowercase(), "keywords match a lowercased query");
                for v in rule.votes {
                    assert!(book.provider(v.provider).is_some(), "{}", v.provider);
                }
            }
            for a in book.anti_patterns {
                assert!(book.provider(a.provider).is_some(), "{}", a.provider);
            }
            if let Some(fallback) = book.fallback {
                assert!(book.provider(fallback.provider).is_some());
            }
        }
    }

    #[test]
    fn provider_lookup_ignores_case() {
        assert_eq!(INVOICE.provider_index("ecpay"), Some(0));
        assert_eq!(PAYMENT.provider_index(" PAYUNI "), Some(2));
        assert_eq!(PAYMENT.provider_index("linepay"), None);
    }

    #[test]
    fn payment_reports_every_caveat_without_fallback() {
        assert!(PAYMENT.fallback.is_none());
        assert!(!PAYMENT.dedup_reasons);
        assert_eq!(PAYMENT.warnings, WarningMode::Always);
        assert_eq!(INVOICE.warnings, WarningMode::Triggered);
    }
}
