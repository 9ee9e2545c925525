//! User-facing texts shown by the widgets.

pub const CART_EMPTY: &str = "سبد خرید شما خالی است";
pub const CART_ADDED: &str = "محصول به سبد خرید اضافه شد";
pub const CART_ADD_FAILED: &str = "خطا در افزودن محصول";
pub const CART_ADDING: &str = "در حال افزودن...";
pub const CART_REMOVED: &str = "محصول از سبد خرید حذف شد";
pub const CART_REMOVE_FAILED: &str = "خطا در حذف محصول";
pub const CART_REMOVE_LABEL: &str = "حذف";
pub const CART_UPDATE_FAILED: &str = "خطا در به‌روزرسانی تعداد";
pub const CART_CLEARED: &str = "سبد خرید پاک شد";
pub const CART_CLEAR_FAILED: &str = "خطا در پاک کردن سبد خرید";
pub const CART_CLEAR_LABEL: &str = "خالی کردن سبد";
pub const CART_TOTAL_LABEL: &str = "جمع کل:";
pub const CART_ITEMS_SUFFIX: &str = "کالا";

pub const SERVER_UNREACHABLE: &str = "خطا در ارتباط با سرور";

pub const STATES_LOADING: &str = "در حال بارگذاری استان‌ها...";
pub const STATES_PROMPT: &str = "لطفا استان را انتخاب کنید";
pub const STATES_FAILED: &str = "خطا در بارگذاری استان‌ها";
pub const STATES_ALERT: &str = "خطا در بارگذاری لیست استان‌ها. لطفا دوباره تلاش کنید.";
pub const CITIES_PLACEHOLDER: &str = "ابتدا استان را انتخاب کنید";
pub const CITIES_LOADING: &str = "در حال بارگذاری شهرها...";
pub const CITIES_PROMPT: &str = "لطفا شهر را انتخاب کنید";
pub const CITIES_FAILED: &str = "خطا در بارگذاری شهرها";
pub const CITIES_ALERT: &str = "خطا در بارگذاری لیست شهرها. لطفا دوباره تلاش کنید.";

pub const LOCATION_CHOOSE: &str = "انتخاب موقعیت";
pub const LOCATION_MODAL_TITLE: &str = "انتخاب موقعیت مکانی";
pub const LOCATION_STATE_LABEL: &str = "استان";
pub const LOCATION_CITY_LABEL: &str = "شهر";
pub const LOCATION_SAVE_LABEL: &str = "تایید موقعیت";
pub const LOCATION_SAVING: &str = "در حال ذخیره...";
pub const LOCATION_SAVED: &str = "موقعیت شما با موفقیت ذخیره شد";
pub const LOCATION_SAVE_FAILED_PREFIX: &str = "خطا در ذخیره موقعیت: ";

pub const OFFLINE_CHECK: &str = "اتصال اینترنت خود را بررسی کنید";
pub const BACK_ONLINE: &str = "اتصال اینترنت برقرار شد";
pub const WENT_OFFLINE: &str = "اتصال اینترنت قطع شد";
