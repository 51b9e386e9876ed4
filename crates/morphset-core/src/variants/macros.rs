//! Delegation of the `Settings` surface to a variant's record

/// Accessors identical across the four variants, delegating to `self.record`
macro_rules! record_accessors {
    () => {
        fn schema(&self) -> &std::sync::Arc<$crate::model::SettingsSchema> {
            self.record.schema()
        }

        fn kind(&self) -> $crate::core_types::SettingsKind {
            self.record.kind()
        }

        fn get(&self, property: &str) -> $crate::errors::Result<$crate::model::Value> {
            self.record.get(property)
        }

        fn list(
            &self,
            property: &str,
        ) -> $crate::errors::Result<&$crate::collection::ObservableList> {
            self.record.list(property)
        }

        fn dict(&self, property: &str) -> $crate::errors::Result<&$crate::dict::SettingsDict> {
            self.record.dict(property)
        }

        fn snapshot(&self) -> $crate::model::Value {
            self.record.snapshot()
        }

        fn notifier(&self) -> Option<&std::sync::Arc<$crate::observe::ChangeNotifier>> {
            self.record.notifier()
        }

        fn subscribe(
            &self,
            callback: $crate::observe::ChangeCallback,
        ) -> $crate::errors::Result<$crate::observe::SubscriptionId> {
            self.record.subscribe(callback)
        }

        fn unsubscribe(
            &self,
            id: $crate::observe::SubscriptionId,
        ) -> $crate::errors::Result<bool> {
            self.record.unsubscribe(id)
        }

        fn provider(&self) -> Option<&$crate::provider::ProviderLink> {
            self.record.provider()
        }

        fn set_provider(&mut self, link: Option<$crate::provider::ProviderLink>) {
            self.record.set_provider(link)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
            self
        }
    };
}

/// Mutators shared by the writable variants
macro_rules! record_mutators {
    () => {
        fn set(
            &mut self,
            property: &str,
            value: $crate::model::Value,
        ) -> $crate::errors::Result<()> {
            self.record.write(property, value)
        }

        fn list_mut(
            &mut self,
            property: &str,
        ) -> $crate::errors::Result<&mut $crate::collection::ObservableList> {
            self.record.list_mut(property)
        }

        fn dict_mut(
            &mut self,
            property: &str,
        ) -> $crate::errors::Result<&mut $crate::dict::SettingsDict> {
            self.record.dict_mut(property)
        }

        fn copy(
            &mut self,
            source: Option<&dyn $crate::variants::Settings>,
        ) -> $crate::errors::Result<()> {
            let source = source.ok_or_else(|| $crate::errors::MorphsetError::NullSource {
                schema: self.record.schema().name().to_string(),
            })?;
            self.record.assign_from(source)
        }
    };
}
