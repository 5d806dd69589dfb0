use serde::{Deserialize, Serialize};

use super::error::{FinanceError, FinanceResult};
use super::reference::ScenarioId;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hu,
    En,
    Es,
    De,
    Ru,
    Zh,
    Tr,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Hu,
        Language::En,
        Language::Es,
        Language::De,
        Language::Ru,
        Language::Zh,
        Language::Tr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Hu => "hu",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Tr => "tr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Hu => "HU",
            Language::En => "EN",
            Language::Es => "ES",
            Language::De => "DE",
            Language::Ru => "RU",
            Language::Zh => "ZH",
            Language::Tr => "TR",
        }
    }

    pub fn from_code(code: &str) -> FinanceResult<Self> {
        let code = code.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| FinanceError::UnknownLanguage(code.to_string()))
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::Hu => &HU,
            Language::En => &EN,
            Language::Es => &ES,
            Language::De => &DE,
            Language::Ru => &RU,
            Language::Zh => &ZH,
            Language::Tr => &TR,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExpenseLabels {
    pub rent: &'static str,
    pub utilities: &'static str,
    pub food: &'static str,
    pub transport: &'static str,
    pub subscriptions: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ScenarioNames {
    pub pillow: &'static str,
    pub bond: &'static str,
    pub sp500: &'static str,
}

/// Row labels of the text report.
#[derive(Debug, Clone, Copy)]
pub struct ReportLabels {
    pub gross: &'static str,
    pub net: &'static str,
    pub employer_cost: &'static str,
    pub hourly_wage: &'static str,
    pub quintile: &'static str,
    pub total: &'static str,
    pub remaining: &'static str,
}

#[derive(Debug)]
pub struct Translations {
    pub expenses: ExpenseLabels,
    pub quintile_labels: [&'static str; 5],
    pub quintile_descs: [&'static str; 5],
    pub scenarios: ScenarioNames,
    pub disaster_events: &'static [&'static str],
    pub added_feedback: &'static str,
    pub bankruptcy: &'static str,
    pub loan_moderate_warning: &'static str,
    pub loan_critical_warning: &'static str,
    pub loan_payment_label: &'static str,
    pub loan_market_payment_label: &'static str,
    pub report: ReportLabels,
}

impl Translations {
    pub fn scenario_name(&self, id: ScenarioId) -> &'static str {
        match id {
            ScenarioId::Pillow => self.scenarios.pillow,
            ScenarioId::Bond => self.scenarios.bond,
            ScenarioId::Sp500 => self.scenarios.sp500,
        }
    }
}

static HU: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Albérlet",
        utilities: "Rezsi",
        food: "Élelmiszer",
        transport: "Közlekedés (BKK bérlet)",
        subscriptions: "Előfizetések",
    },
    quintile_labels: [
        "1. ötöd (legalsó)",
        "2. ötöd",
        "3. ötöd (közép)",
        "4. ötöd",
        "5. ötöd (legfelső)",
    ],
    quintile_descs: [
        "Minimálbér közelében keresők",
        "Átlag alatti fizetések",
        "A medián bér környéke",
        "Átlag feletti fizetések",
        "A legjobban keresők",
    ],
    scenarios: ScenarioNames {
        pillow: "Párnacihában",
        bond: "Állampapír",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Elromlott a mosógép",
        "Fogorvosi kezelés",
        "Autószerviz",
        "Elveszett telefon",
        "Beázott a lakás",
    ],
    added_feedback: "hozzáadva a kiadásokhoz!",
    bankruptcy: "Csőd! A megtakarításaid elfogytak, és hitelt sem kapsz.",
    loan_moderate_warning: "A törlesztő a nettó jövedelmed több mint 30%-a.",
    loan_critical_warning: "A törlesztő a nettó jövedelmed több mint 50%-a!",
    loan_payment_label: "Lakáshitel törlesztő",
    loan_market_payment_label: "Lakáshitel (piaci 7.24%)",
    report: ReportLabels {
        gross: "Bruttó",
        net: "Nettó",
        employer_cost: "Munkáltatói költség",
        hourly_wage: "Órabér",
        quintile: "Ötöd",
        total: "Összesen",
        remaining: "Marad",
    },
};

static EN: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Rent",
        utilities: "Utilities",
        food: "Food",
        transport: "Transport (BKK pass)",
        subscriptions: "Subscriptions",
    },
    quintile_labels: [
        "1st quintile (lowest)",
        "2nd quintile",
        "3rd quintile (middle)",
        "4th quintile",
        "5th quintile (highest)",
    ],
    quintile_descs: [
        "Earning around the minimum wage",
        "Below-average salaries",
        "Around the median salary",
        "Above-average salaries",
        "Top earners",
    ],
    scenarios: ScenarioNames {
        pillow: "Under the pillow",
        bond: "Government bond",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Broken washing machine",
        "Dental treatment",
        "Car repair",
        "Lost phone",
        "Flooded flat",
    ],
    added_feedback: "added to expenses!",
    bankruptcy: "Bankrupt! Your savings are gone and no one will lend to you.",
    loan_moderate_warning: "The instalment is more than 30% of your net income.",
    loan_critical_warning: "The instalment is more than 50% of your net income!",
    loan_payment_label: "Mortgage instalment",
    loan_market_payment_label: "Mortgage (market 7.24%)",
    report: ReportLabels {
        gross: "Gross",
        net: "Net",
        employer_cost: "Employer cost",
        hourly_wage: "Hourly wage",
        quintile: "Quintile",
        total: "Total",
        remaining: "Remaining",
    },
};

static ES: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Alquiler",
        utilities: "Suministros",
        food: "Comida",
        transport: "Transporte (abono BKK)",
        subscriptions: "Suscripciones",
    },
    quintile_labels: [
        "1.er quintil (más bajo)",
        "2.º quintil",
        "3.er quintil (medio)",
        "4.º quintil",
        "5.º quintil (más alto)",
    ],
    quintile_descs: [
        "Cerca del salario mínimo",
        "Salarios por debajo de la media",
        "Alrededor del salario mediano",
        "Salarios por encima de la media",
        "Los que más ganan",
    ],
    scenarios: ScenarioNames {
        pillow: "Bajo el colchón",
        bond: "Bono del Estado",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Lavadora averiada",
        "Tratamiento dental",
        "Reparación del coche",
        "Teléfono perdido",
        "Piso inundado",
    ],
    added_feedback: "añadido a los gastos!",
    bankruptcy: "¡Bancarrota! Tus ahorros se agotaron y nadie te presta.",
    loan_moderate_warning: "La cuota supera el 30% de tus ingresos netos.",
    loan_critical_warning: "¡La cuota supera el 50% de tus ingresos netos!",
    loan_payment_label: "Cuota de la hipoteca",
    loan_market_payment_label: "Hipoteca (mercado 7.24%)",
    report: ReportLabels {
        gross: "Bruto",
        net: "Neto",
        employer_cost: "Coste para el empleador",
        hourly_wage: "Salario por hora",
        quintile: "Quintil",
        total: "Total",
        remaining: "Restante",
    },
};

static DE: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Miete",
        utilities: "Nebenkosten",
        food: "Lebensmittel",
        transport: "Verkehr (BKK-Monatskarte)",
        subscriptions: "Abonnements",
    },
    quintile_labels: [
        "1. Quintil (unterstes)",
        "2. Quintil",
        "3. Quintil (Mitte)",
        "4. Quintil",
        "5. Quintil (oberstes)",
    ],
    quintile_descs: [
        "Verdienst nahe am Mindestlohn",
        "Unterdurchschnittliche Gehälter",
        "Rund um das Mediangehalt",
        "Überdurchschnittliche Gehälter",
        "Spitzenverdiener",
    ],
    scenarios: ScenarioNames {
        pillow: "Unter dem Kopfkissen",
        bond: "Staatsanleihe",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Kaputte Waschmaschine",
        "Zahnbehandlung",
        "Autoreparatur",
        "Verlorenes Handy",
        "Wasserschaden in der Wohnung",
    ],
    added_feedback: "zu den Ausgaben hinzugefügt!",
    bankruptcy: "Bankrott! Deine Ersparnisse sind weg und niemand leiht dir Geld.",
    loan_moderate_warning: "Die Rate beträgt mehr als 30% deines Nettoeinkommens.",
    loan_critical_warning: "Die Rate beträgt mehr als 50% deines Nettoeinkommens!",
    loan_payment_label: "Kreditrate",
    loan_market_payment_label: "Kredit (Marktzins 7.24%)",
    report: ReportLabels {
        gross: "Brutto",
        net: "Netto",
        employer_cost: "Arbeitgeberkosten",
        hourly_wage: "Stundenlohn",
        quintile: "Quintil",
        total: "Summe",
        remaining: "Verbleibend",
    },
};

static RU: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Аренда",
        utilities: "Коммунальные услуги",
        food: "Продукты",
        transport: "Транспорт (проездной BKK)",
        subscriptions: "Подписки",
    },
    quintile_labels: [
        "1-й квинтиль (низший)",
        "2-й квинтиль",
        "3-й квинтиль (средний)",
        "4-й квинтиль",
        "5-й квинтиль (высший)",
    ],
    quintile_descs: [
        "Доход около минимальной зарплаты",
        "Зарплаты ниже среднего",
        "Около медианной зарплаты",
        "Зарплаты выше среднего",
        "Самые высокие доходы",
    ],
    scenarios: ScenarioNames {
        pillow: "Под подушкой",
        bond: "Гособлигации",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Сломалась стиральная машина",
        "Лечение зубов",
        "Ремонт машины",
        "Потерянный телефон",
        "Затопило квартиру",
    ],
    added_feedback: "добавлено в расходы!",
    bankruptcy: "Банкротство! Сбережения закончились, и в кредите отказано.",
    loan_moderate_warning: "Платёж превышает 30% вашего чистого дохода.",
    loan_critical_warning: "Платёж превышает 50% вашего чистого дохода!",
    loan_payment_label: "Платёж по ипотеке",
    loan_market_payment_label: "Ипотека (рыночная 7.24%)",
    report: ReportLabels {
        gross: "Брутто",
        net: "Нетто",
        employer_cost: "Затраты работодателя",
        hourly_wage: "Почасовая ставка",
        quintile: "Квинтиль",
        total: "Итого",
        remaining: "Остаток",
    },
};

static ZH: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "房租",
        utilities: "水电燃气",
        food: "食品",
        transport: "交通（BKK月票）",
        subscriptions: "订阅服务",
    },
    quintile_labels: [
        "第一五分位（最低）",
        "第二五分位",
        "第三五分位（中间）",
        "第四五分位",
        "第五五分位（最高）",
    ],
    quintile_descs: [
        "收入接近最低工资",
        "低于平均水平的工资",
        "中位数工资附近",
        "高于平均水平的工资",
        "收入最高的人群",
    ],
    scenarios: ScenarioNames {
        pillow: "藏在枕头下",
        bond: "国债",
        sp500: "标普500",
    },
    disaster_events: &["洗衣机坏了", "看牙医", "修车", "手机丢了", "房子漏水"],
    added_feedback: "已添加到支出！",
    bankruptcy: "破产！你的储蓄已用完，也借不到钱。",
    loan_moderate_warning: "月供超过你净收入的30%。",
    loan_critical_warning: "月供超过你净收入的50%！",
    loan_payment_label: "房贷月供",
    loan_market_payment_label: "房贷（市场利率 7.24%）",
    report: ReportLabels {
        gross: "税前",
        net: "税后",
        employer_cost: "雇主成本",
        hourly_wage: "时薪",
        quintile: "五分位",
        total: "合计",
        remaining: "剩余",
    },
};

static TR: Translations = Translations {
    expenses: ExpenseLabels {
        rent: "Kira",
        utilities: "Faturalar",
        food: "Gıda",
        transport: "Ulaşım (BKK abonmanı)",
        subscriptions: "Abonelikler",
    },
    quintile_labels: [
        "1. dilim (en düşük)",
        "2. dilim",
        "3. dilim (orta)",
        "4. dilim",
        "5. dilim (en yüksek)",
    ],
    quintile_descs: [
        "Asgari ücrete yakın kazananlar",
        "Ortalamanın altındaki maaşlar",
        "Medyan maaş civarı",
        "Ortalamanın üstündeki maaşlar",
        "En çok kazananlar",
    ],
    scenarios: ScenarioNames {
        pillow: "Yastık altı",
        bond: "Devlet tahvili",
        sp500: "S&P 500",
    },
    disaster_events: &[
        "Çamaşır makinesi bozuldu",
        "Diş tedavisi",
        "Araba tamiri",
        "Kaybolan telefon",
        "Evi su bastı",
    ],
    added_feedback: "giderlere eklendi!",
    bankruptcy: "İflas! Birikimlerin bitti ve kimse sana borç vermiyor.",
    loan_moderate_warning: "Taksit, net gelirinin %30'undan fazla.",
    loan_critical_warning: "Taksit, net gelirinin %50'sinden fazla!",
    loan_payment_label: "Konut kredisi taksiti",
    loan_market_payment_label: "Konut kredisi (piyasa %7.24)",
    report: ReportLabels {
        gross: "Brüt",
        net: "Net",
        employer_cost: "İşveren maliyeti",
        hourly_wage: "Saatlik ücret",
        quintile: "Dilim",
        total: "Toplam",
        remaining: "Kalan",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_accepts_any_case() {
        assert_eq!(Language::from_code("EN"), Ok(Language::En));
        assert_eq!(Language::from_code(" zh "), Ok(Language::Zh));
        assert!(matches!(
            Language::from_code("fr"),
            Err(FinanceError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn every_language_has_every_string() {
        for lang in Language::ALL {
            let t = lang.translations();
            assert!(!t.expenses.rent.is_empty(), "{}", lang.code());
            assert!(t.quintile_labels.iter().all(|s| !s.is_empty()));
            assert!(t.quintile_descs.iter().all(|s| !s.is_empty()));
            assert!(!t.disaster_events.is_empty());
            assert!(!t.added_feedback.is_empty());
            assert!(!t.bankruptcy.is_empty());
            assert!(!t.loan_payment_label.is_empty());
            assert!(!t.loan_market_payment_label.is_empty());
            assert!(!t.report.remaining.is_empty());
        }
    }

    #[test]
    fn language_serializes_as_lowercase_code() {
        let json = serde_json::to_string(&Language::De).expect("serialize");
        assert_eq!(json, "\"de\"");
    }
}
